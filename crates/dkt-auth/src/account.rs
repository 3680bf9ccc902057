use super::*;
use chrono::DateTime;
use chrono::Utc;
use dkt_core::ID;
use dkt_core::Unique;

/// Registered practitioner with a verified identity.
///
/// The password hash is a storage-only field and never lives on this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: ID<Self>,
    name: String,
    email: String,
    role: Role,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Account {
    pub fn new(id: ID<Self>, name: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            role,
            created: now,
            updated: now,
        }
    }
    pub fn hydrate(
        id: ID<Self>,
        name: String,
        email: String,
        role: Role,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            created,
            updated,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
    /// Applies a profile edit and bumps the update timestamp.
    pub fn rename(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
        self.updated = Utc::now();
    }
    pub fn assign(&mut self, role: Role) {
        self.role = role;
        self.updated = Utc::now();
    }
    /// The public projection carried in tokens and API responses.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Account listing row for administrators. Includes timestamps, never the hash.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: ID<Account>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            created_at: account.created,
            updated_at: account.updated,
        }
    }
}

mod schema {
    use super::*;
    use dkt_pg::*;

    impl Schema for Account {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    name        VARCHAR(255) NOT NULL,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    hashword    TEXT,
                    role        VARCHAR(16) NOT NULL DEFAULT 'LAWYER',
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
