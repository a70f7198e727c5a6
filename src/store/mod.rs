//! Persistence for the Customers table: backend trait, staged changes, and the
//! per-request persistence context that commits them as one unit of work.

mod memory;
mod postgres;

pub use memory::MemoryCustomerStore;
pub use postgres::{ensure_database_exists, PgCustomerStore};

use crate::error::StoreError;
use crate::model::Customer;
use async_trait::async_trait;
use std::sync::Arc;

/// One staged modification, applied by [`CustomerStore::commit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Add(Customer),
    Update(Customer),
    Remove(i32),
}

/// Backend holding Customer rows. Implementations must apply a commit batch
/// atomically: either every change lands or none does.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All rows in insertion order.
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, StoreError>;

    async fn commit(&self, changes: Vec<Change>) -> Result<(), StoreError>;

    /// Cheap liveness check used by readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Per-request view over a [`CustomerStore`]. Reads go straight to the store;
/// writes are staged until [`CustomerContext::save`].
pub struct CustomerContext {
    store: Arc<dyn CustomerStore>,
    pending: Vec<Change>,
}

impl CustomerContext {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        CustomerContext {
            store,
            pending: Vec::new(),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        self.store.list_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Stage an insert. A duplicate id surfaces from `save`.
    pub fn add(&mut self, customer: Customer) {
        self.pending.push(Change::Add(customer));
    }

    /// Stage an overwrite of name/email/phone for `customer.id`.
    pub fn update(&mut self, customer: Customer) {
        self.pending.push(Change::Update(customer));
    }

    /// Stage deletion of a previously fetched record.
    pub fn remove(&mut self, customer: &Customer) {
        self.pending.push(Change::Remove(customer.id));
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Commit everything staged. On error the batch is dropped and the store
    /// is left as it was.
    pub async fn save(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let changes = std::mem::take(&mut self.pending);
        tracing::debug!(changes = changes.len(), "committing unit of work");
        self.store.commit(changes).await
    }
}
