use super::*;
use dkt_core::ID;
use dkt_core::Unique;
use dkt_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Account persistence. Abstracts SQL from the authentication flow.
#[allow(async_fn_in_trait)]
pub trait Accounts {
    async fn create(&self, account: &Account, hashword: Option<&str>) -> Result<(), StoreError>;
    /// Exact, case-sensitive match. Returns the stored hash alongside.
    async fn by_email(&self, email: &str) -> Result<Option<(Account, Option<String>)>, StoreError>;
    async fn by_id(&self, id: ID<Account>) -> Result<Option<Account>, StoreError>;
    async fn update(&self, account: &Account) -> Result<(), StoreError>;
    /// Replaces the stored password hash. `false` if the account is gone.
    async fn rehash(&self, id: ID<Account>, hashword: &str) -> Result<bool, StoreError>;
    async fn delete(&self, id: ID<Account>) -> Result<bool, StoreError>;
    async fn all(&self) -> Result<Vec<Account>, StoreError>;
}

const COLUMNS: &str = "id, name, email, role, created_at, updated_at";

fn account(row: &tokio_postgres::Row) -> Account {
    let role = row.get::<_, String>(3);
    let role = Role::try_from(role.as_str())
        .inspect_err(|e| log::warn!("{} on account {}, treating as standard", e, row.get::<_, uuid::Uuid>(0)))
        .unwrap_or_default();
    Account::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        role,
        row.get(4),
        row.get(5),
    )
}

impl Accounts for Arc<Client> {
    async fn create(&self, account: &Account, hashword: Option<&str>) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, name, email, hashword, role, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7)"
            ),
            &[
                &account.id().inner(),
                &account.name(),
                &account.email(),
                &hashword,
                &account.role().as_str(),
                &account.created(),
                &account.updated(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn by_email(&self, email: &str) -> Result<Option<(Account, Option<String>)>, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, ", hashword FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await
        .map(|opt| opt.map(|row| (account(&row), row.get::<_, Option<String>>(6))))
        .map_err(StoreError::from)
    }

    async fn by_id(&self, id: ID<Account>) -> Result<Option<Account>, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.as_ref().map(account))
        .map_err(StoreError::from)
    }

    async fn update(&self, account: &Account) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET name = $2, email = $3, role = $4, updated_at = $5 WHERE id = $1"
            ),
            &[
                &account.id().inner(),
                &account.name(),
                &account.email(),
                &account.role().as_str(),
                &account.updated(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn rehash(&self, id: ID<Account>, hashword: &str) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET hashword = $2, updated_at = now() WHERE id = $1"),
            &[&id.inner(), &hashword],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }

    async fn delete(&self, id: ID<Account>) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", USERS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }

    async fn all(&self) -> Result<Vec<Account>, StoreError> {
        self.query(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " ORDER BY created_at"),
            &[],
        )
        .await
        .map(|rows| rows.iter().map(account).collect())
        .map_err(StoreError::from)
    }
}
