//! In-Memory Store
//!
//! HashMap-backed store used for local runs and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PassportStore, StoreError, WriteCondition};
use crate::models::Passport;

// == In-Memory Store ==
/// Passport table held in process memory.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, Passport>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number of records.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PassportStore for InMemoryStore {
    async fn get(&self, address: &str) -> Result<Option<Passport>, StoreError> {
        Ok(self.entries.read().await.get(address).cloned())
    }

    async fn put(&self, passport: &Passport, condition: WriteCondition) -> Result<(), StoreError> {
        // Condition check and write happen under one lock
        let mut entries = self.entries.write().await;
        if !condition.holds(entries.get(&passport.address)) {
            return Err(StoreError::ConditionFailed(passport.address.clone()));
        }
        entries.insert(passport.address.clone(), passport.clone());
        Ok(())
    }

    async fn delete(&self, address: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(address);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Passport>, StoreError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }
}
