//! Passport Service
//!
//! Owns the read-then-write sequence of create-or-update so the dispatcher
//! never talks to the store directly.

use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{PassportError, Result, ValidationError};
use crate::models::{Passport, ValidatedPassportInput};
use crate::store::{PassportStore, StoreError, WriteCondition};

// == Passport Service ==
/// Stateless record operations over a shared store handle.
#[derive(Clone)]
pub struct PassportService {
    store: Arc<dyn PassportStore>,
    clock: Arc<dyn Clock>,
}

impl PassportService {
    /// Creates a service stamping records with the wall clock.
    pub fn new(store: Arc<dyn PassportStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn PassportStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    // == Read One ==
    /// Returns the passport for `address`, `None` when there is none.
    pub async fn get(&self, address: &str) -> Result<Option<Passport>> {
        Ok(self.store.get(address).await?)
    }

    // == Read All ==
    pub async fn list(&self) -> Result<Vec<Passport>> {
        Ok(self.store.scan().await?)
    }

    // == Delete ==
    /// Deletes the passport for `address`. Succeeds whether or not it existed.
    pub async fn delete(&self, address: &str) -> Result<()> {
        self.store.delete(address).await?;
        info!("Deleted passport {}", address);
        Ok(())
    }

    // == Create Or Update ==
    /// Inserts a passport for a new address or updates the existing one.
    ///
    /// Inserts return the record as built. Updates require a transaction ID
    /// and return the record re-read from the store after the write.
    ///
    /// Writes are conditional: an insert fails if the address appeared in the
    /// meantime, an update fails if `lastUpdated` moved since it was read.
    pub async fn create_or_update(&self, input: ValidatedPassportInput) -> Result<Passport> {
        match self.store.get(&input.address).await? {
            None => self.insert(input).await,
            Some(existing) => self.update(input, existing).await,
        }
    }

    async fn insert(&self, input: ValidatedPassportInput) -> Result<Passport> {
        let passport = Passport::issue(
            input.address,
            input.score,
            input.transaction_id,
            self.clock.now_ms(),
        );

        self.store.put(&passport, WriteCondition::NotExists).await?;
        info!("Issued passport {} with score {}", passport.address, passport.score);

        Ok(passport)
    }

    async fn update(&self, input: ValidatedPassportInput, existing: Passport) -> Result<Passport> {
        let transaction_id = input
            .transaction_id
            .ok_or(ValidationError::MissingTransactionId)?;

        let previous = existing.last_updated;
        // lastUpdated must move forward even if the clock did not
        let next = previous.checked_add(1).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "lastUpdated of passport {} cannot advance past {}",
                existing.address, previous
            ))
        })?;
        let last_updated = self.clock.now_ms().max(next);

        let updated = Passport {
            address: input.address,
            score: input.score,
            last_updated,
            transaction_id: Some(transaction_id),
            ..existing
        };

        self.store
            .put(&updated, WriteCondition::LastUpdatedEquals(previous))
            .await?;
        debug!(
            "Updated passport {} (lastUpdated {} -> {})",
            updated.address, previous, last_updated
        );

        let stored = self.store.get(&updated.address).await?;
        stored.ok_or(PassportError::Vanished(updated.address))
    }
}
