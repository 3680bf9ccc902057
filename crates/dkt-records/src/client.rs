use super::*;
use chrono::DateTime;
use chrono::Utc;
use dkt_auth::Account;
use dkt_auth::ApiError;
use dkt_auth::FieldError;
use dkt_auth::Owned;
use dkt_core::ID;
use dkt_core::Unique;

/// A person or organisation the practice represents.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ID<Client>,
    pub user_id: ID<Account>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ClientDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Unique for Client {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Owned for Client {
    fn owner(&self) -> ID<Account> {
        self.user_id
    }
}

impl Record for Client {
    const KIND: &'static str = "Client";
    const PATH: &'static str = "/api/clients";
    type Draft = ClientDraft;
    fn draft(owner: ID<Account>, draft: ClientDraft) -> Result<Self, ApiError> {
        let mut errors = Vec::new();
        let name = required(&mut errors, "name", &draft.name, "Name is required");
        let email = optional(draft.email);
        if email.as_deref().is_some_and(|e| !dkt_auth::validate::email(e)) {
            errors.push(FieldError::new("email", "Invalid email address"));
        }
        finish(errors)?;
        let now = Utc::now();
        Ok(Self {
            id: ID::default(),
            user_id: owner,
            name,
            email,
            phone: optional(draft.phone),
            created_at: now,
            updated_at: now,
        })
    }
    fn succeed(self, prior: &Self) -> Self {
        Self {
            id: prior.id,
            user_id: prior.user_id,
            created_at: prior.created_at,
            ..self
        }
    }
}

mod schema {
    use super::*;
    use dkt_pg::*;

    const COLUMNS: &str = "id, user_id, name, email, phone, created_at, updated_at";

    impl Schema for Client {
        fn name() -> &'static str {
            CLIENTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                CLIENTS,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    name        VARCHAR(255) NOT NULL,
                    email       VARCHAR(255),
                    phone       VARCHAR(64),
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_clients_user ON ",
                CLIENTS,
                " (user_id);"
            )
        }
    }

    impl Table for Client {
        const FETCH: &'static str = const_format::concatcp!("SELECT ", COLUMNS, " FROM ", CLIENTS, " WHERE id = $1");
        const LIST: &'static str = const_format::concatcp!(
            "SELECT ",
            COLUMNS,
            " FROM ",
            CLIENTS,
            " WHERE ($1::uuid IS NULL OR user_id = $1) ORDER BY name"
        );
        const DELETE: &'static str = const_format::concatcp!("DELETE FROM ", CLIENTS, " WHERE id = $1");
        fn decode(row: &tokio_postgres::Row) -> Self {
            Self {
                id: ID::from(row.get::<_, uuid::Uuid>(0)),
                user_id: ID::from(row.get::<_, uuid::Uuid>(1)),
                name: row.get(2),
                email: row.get(3),
                phone: row.get(4),
                created_at: row.get(5),
                updated_at: row.get(6),
            }
        }
        async fn insert(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr> {
            client
                .execute(
                    const_format::concatcp!(
                        "INSERT INTO ",
                        CLIENTS,
                        " (",
                        COLUMNS,
                        ") VALUES ($1, $2, $3, $4, $5, $6, $7)"
                    ),
                    &[
                        &self.id.inner(),
                        &self.user_id.inner(),
                        &self.name,
                        &self.email,
                        &self.phone,
                        &self.created_at,
                        &self.updated_at,
                    ],
                )
                .await
        }
        async fn update(&self, client: &tokio_postgres::Client) -> Result<u64, PgErr> {
            client
                .execute(
                    const_format::concatcp!(
                        "UPDATE ",
                        CLIENTS,
                        " SET name = $2, email = $3, phone = $4, updated_at = $5 WHERE id = $1"
                    ),
                    &[&self.id.inner(), &self.name, &self.email, &self.phone, &self.updated_at],
                )
                .await
        }
    }
}
