//! In-process backend. Rows live in a vector so insertion order is the list order.

use super::{Change, CustomerStore};
use crate::error::StoreError;
use crate::model::Customer;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryCustomerStore {
    rows: RwLock<Vec<Customer>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply(rows: &mut Vec<Customer>, change: Change) -> Result<(), StoreError> {
    match change {
        Change::Add(c) => {
            if rows.iter().any(|r| r.id == c.id) {
                return Err(StoreError::DuplicateId(c.id));
            }
            rows.push(c);
        }
        Change::Update(c) => {
            let row = rows.iter_mut().find(|r| r.id == c.id).ok_or(StoreError::Missing(c.id))?;
            row.overwrite_from(&c);
        }
        Change::Remove(id) => {
            let idx = rows.iter().position(|r| r.id == id).ok_or(StoreError::Missing(id))?;
            rows.remove(idx);
        }
    }
    Ok(())
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn commit(&self, changes: Vec<Change>) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(|e| e.into_inner());
        // Work on a copy so a failing change leaves the table untouched.
        let mut next = rows.clone();
        for change in changes {
            apply(&mut next, change)?;
        }
        *rows = next;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
