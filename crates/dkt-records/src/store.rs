use super::*;
use dkt_auth::Scope;
use dkt_core::ID;
use dkt_pg::StoreError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Persistence for one record kind. List queries take the caller's
/// [`Scope`] so filtering happens in storage, not after loading.
#[allow(async_fn_in_trait)]
pub trait Store<R: Record> {
    async fn fetch(&self, id: ID<R>) -> Result<Option<R>, StoreError>;
    async fn list(&self, scope: Scope) -> Result<Vec<R>, StoreError>;
    async fn insert(&self, record: &R) -> Result<(), StoreError>;
    /// Replaces the stored record with the same id. `false` if it is gone.
    async fn update(&self, record: &R) -> Result<bool, StoreError>;
    async fn delete(&self, id: ID<R>) -> Result<bool, StoreError>;
}

/// Every record store the HTTP surface needs.
pub trait Stores: Store<Case> + Store<Client> + Store<Hearing> + Store<Document> {}

impl<S> Stores for S where S: Store<Case> + Store<Client> + Store<Hearing> + Store<Document> {}

impl<R: Record + Table> Store<R> for Arc<tokio_postgres::Client> {
    async fn fetch(&self, id: ID<R>) -> Result<Option<R>, StoreError> {
        self.query_opt(R::FETCH, &[&id.inner()])
            .await
            .map(|opt| opt.as_ref().map(R::decode))
            .map_err(StoreError::from)
    }

    async fn list(&self, scope: Scope) -> Result<Vec<R>, StoreError> {
        self.query(R::LIST, &[&scope.owner()])
            .await
            .map(|rows| rows.iter().map(R::decode).collect())
            .map_err(StoreError::from)
    }

    async fn insert(&self, record: &R) -> Result<(), StoreError> {
        record
            .insert(self)
            .await
            .map(|_| ())
            .map_err(StoreError::from)
    }

    async fn update(&self, record: &R) -> Result<bool, StoreError> {
        record
            .update(self)
            .await
            .map(|n| n > 0)
            .map_err(StoreError::from)
    }

    async fn delete(&self, id: ID<R>) -> Result<bool, StoreError> {
        self.execute(R::DELETE, &[&id.inner()])
            .await
            .map(|n| n > 0)
            .map_err(StoreError::from)
    }
}

/// One in-memory table.
pub struct Shelf<R> {
    rows: RwLock<HashMap<ID<R>, R>>,
}

impl<R> Default for Shelf<R> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

/// Picks the shelf holding records of kind `R`.
pub trait Holds<R> {
    fn shelf(&self) -> &Shelf<R>;
}

/// In-process record store for tests and database-less local runs.
/// Unlike PostgreSQL it does not cascade deletes from cases.
#[derive(Default)]
pub struct MemoryRecords {
    cases: Shelf<Case>,
    clients: Shelf<Client>,
    hearings: Shelf<Hearing>,
    documents: Shelf<Document>,
}

impl MemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Holds<Case> for MemoryRecords {
    fn shelf(&self) -> &Shelf<Case> {
        &self.cases
    }
}
impl Holds<Client> for MemoryRecords {
    fn shelf(&self) -> &Shelf<Client> {
        &self.clients
    }
}
impl Holds<Hearing> for MemoryRecords {
    fn shelf(&self) -> &Shelf<Hearing> {
        &self.hearings
    }
}
impl Holds<Document> for MemoryRecords {
    fn shelf(&self) -> &Shelf<Document> {
        &self.documents
    }
}

impl<R: Record> Store<R> for MemoryRecords
where
    MemoryRecords: Holds<R>,
{
    async fn fetch(&self, id: ID<R>) -> Result<Option<R>, StoreError> {
        Ok(self.shelf().rows.read().await.get(&id).cloned())
    }

    async fn list(&self, scope: Scope) -> Result<Vec<R>, StoreError> {
        let mut rows = self
            .shelf()
            .rows
            .read()
            .await
            .values()
            .filter(|r| scope.admits(r.owner()))
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by_key(|r| r.id());
        Ok(rows)
    }

    async fn insert(&self, record: &R) -> Result<(), StoreError> {
        let mut rows = self.shelf().rows.write().await;
        if rows.contains_key(&record.id()) {
            return Err(StoreError::Duplicate);
        }
        rows.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &R) -> Result<bool, StoreError> {
        Ok(self
            .shelf()
            .rows
            .write()
            .await
            .get_mut(&record.id())
            .map(|row| *row = record.clone())
            .is_some())
    }

    async fn delete(&self, id: ID<R>) -> Result<bool, StoreError> {
        Ok(self.shelf().rows.write().await.remove(&id).is_some())
    }
}
