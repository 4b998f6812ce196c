//! Passport Record
//!
//! The single entity persisted in the store, keyed by `address`.

use serde::{Deserialize, Serialize};

// == Passport ==
/// A passport record as stored in and returned from the table.
///
/// Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    /// Owner address, primary key
    pub address: String,
    /// Current rating, 0..=1000
    pub score: i64,
    /// Set once at creation
    pub delivery_date: i64,
    /// Set at creation and on every update
    pub last_updated: i64,
    /// Transaction that authorized the latest score change
    #[serde(
        rename = "transactionID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<String>,
}

impl Passport {
    /// Builds a freshly issued passport where `deliveryDate == lastUpdated == now_ms`.
    pub fn issue(
        address: impl Into<String>,
        score: i64,
        transaction_id: Option<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            address: address.into(),
            score,
            delivery_date: now_ms,
            last_updated: now_ms,
            transaction_id,
        }
    }
}
