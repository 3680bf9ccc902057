use super::*;
use dkt_core::ID;
use dkt_core::Unique;
use dkt_pg::StoreError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process account store with the same uniqueness rules as the
/// `users` table. Backs tests and database-less local runs.
#[derive(Default)]
pub struct MemoryAccounts {
    rows: RwLock<HashMap<ID<Account>, (Account, Option<String>)>>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accounts for MemoryAccounts {
    async fn create(&self, account: &Account, hashword: Option<&str>) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&account.id()) || rows.values().any(|(a, _)| a.email() == account.email()) {
            return Err(StoreError::Duplicate);
        }
        rows.insert(account.id(), (account.clone(), hashword.map(str::to_owned)));
        Ok(())
    }

    async fn by_email(&self, email: &str) -> Result<Option<(Account, Option<String>)>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|(a, _)| a.email() == email)
            .cloned())
    }

    async fn by_id(&self, id: ID<Account>) -> Result<Option<Account>, StoreError> {
        Ok(self.rows.read().await.get(&id).map(|(a, _)| a.clone()))
    }

    async fn update(&self, account: &Account) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if rows
            .values()
            .any(|(a, _)| a.email() == account.email() && a.id() != account.id())
        {
            return Err(StoreError::Duplicate);
        }
        if let Some((row, _)) = rows.get_mut(&account.id()) {
            *row = account.clone();
        }
        Ok(())
    }

    async fn rehash(&self, id: ID<Account>, hashword: &str) -> Result<bool, StoreError> {
        Ok(self
            .rows
            .write()
            .await
            .get_mut(&id)
            .map(|(_, hash)| *hash = Some(hashword.to_owned()))
            .is_some())
    }

    async fn delete(&self, id: ID<Account>) -> Result<bool, StoreError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn all(&self) -> Result<Vec<Account>, StoreError> {
        let mut all = self
            .rows
            .read()
            .await
            .values()
            .map(|(a, _)| a.clone())
            .collect::<Vec<_>>();
        all.sort_by_key(|a| a.created());
        Ok(all)
    }
}
