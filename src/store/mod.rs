//! Store Module
//!
//! Record store adapter: get / put / delete / scan of passports keyed by
//! address. Puts are full overwrites guarded by an optional [`WriteCondition`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::models::Passport;

mod memory;

#[cfg(feature = "dynamodb")]
mod dynamodb;

pub use memory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoStore;

// == Store Error ==
/// Failures reported by a store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write precondition did not hold
    #[error("Passport {0} was modified concurrently, retry the request")]
    ConditionFailed(String),

    /// A stored item could not be decoded into a passport
    #[error("Stored passport is malformed: {0}")]
    Corrupt(String),

    /// Network, throttling or permission failure in the backend
    #[error("{0}")]
    Backend(String),
}

// == Write Condition ==
/// Precondition on the currently stored record for a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// Last write wins
    Unconditional,
    /// No record may exist for the address
    NotExists,
    /// The stored record's `lastUpdated` must equal this value
    LastUpdatedEquals(i64),
}

impl WriteCondition {
    /// Checks the condition against the record currently stored, if any.
    pub fn holds(&self, current: Option<&Passport>) -> bool {
        match self {
            WriteCondition::Unconditional => true,
            WriteCondition::NotExists => current.is_none(),
            WriteCondition::LastUpdatedEquals(expected) => {
                current.is_some_and(|passport| passport.last_updated == *expected)
            }
        }
    }
}

// == Passport Store ==
#[async_trait]
pub trait PassportStore: Send + Sync {
    /// Fetches the record for `address`, `None` when absent.
    async fn get(&self, address: &str) -> Result<Option<Passport>, StoreError>;

    /// Overwrites the record for `passport.address` if `condition` holds.
    async fn put(&self, passport: &Passport, condition: WriteCondition) -> Result<(), StoreError>;

    /// Removes the record for `address`. No-op when absent.
    async fn delete(&self, address: &str) -> Result<(), StoreError>;

    /// Returns every record, unpaginated.
    async fn scan(&self) -> Result<Vec<Passport>, StoreError>;
}

/// Builds the process-wide store handle selected by `config`.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn PassportStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory passport store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "dynamodb")]
        StoreBackend::DynamoDb => {
            info!("Using DynamoDB table {}", config.table_name);
            Ok(Arc::new(DynamoStore::from_env(&config.table_name).await))
        }
        #[cfg(not(feature = "dynamodb"))]
        StoreBackend::DynamoDb => anyhow::bail!(
            "STORE_BACKEND=dynamodb requires building with the `dynamodb` feature"
        ),
    }
}
