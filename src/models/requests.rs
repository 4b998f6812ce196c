//! Request DTOs for the passport handler
//!
//! The create-or-update payload arrives loosely typed; validation turns it
//! into a `ValidatedPassportInput` before the store is touched.

use serde::{de, Deserialize, Deserializer};
use serde_json::Number;

use crate::error::ValidationError;

/// Lowest accepted score
pub const MIN_SCORE: i64 = 0;

/// Highest accepted score
pub const MAX_SCORE: i64 = 1000;

/// Request body for PUT /passports
///
/// Every field is optional on the wire; missing ones are reported by
/// [`PassportRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassportRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: Option<i64>,
    #[serde(default, rename = "transactionID")]
    pub transaction_id: Option<String>,
}

/// Reads `score` from any JSON number with no fractional part.
///
/// Values beyond the `i64` range are clamped so they still fail the range
/// check instead of the body parse.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(score) = number.as_i64() {
        return Ok(Some(score));
    }
    if number.is_u64() {
        return Ok(Some(i64::MAX));
    }

    match number.as_f64() {
        Some(score) if score.is_finite() && score.fract() == 0.0 => {
            // `as` saturates at the i64 bounds
            Ok(Some(score as i64))
        }
        _ => Err(de::Error::custom(format!(
            "score must be an integer, got {}",
            number
        ))),
    }
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPassportInput {
    pub address: String,
    pub score: i64,
    /// Never `Some("")`
    pub transaction_id: Option<String>,
}

impl PassportRequest {
    /// Validates the payload.
    ///
    /// Checks run in order: address, score presence, score range. A score of
    /// `0` is reported as missing, so the lower bound is effectively 1.
    pub fn validate(self) -> Result<ValidatedPassportInput, ValidationError> {
        let address = self
            .address
            .filter(|address| !address.is_empty())
            .ok_or(ValidationError::MissingAddress)?;

        let score = self
            .score
            .filter(|score| *score != 0)
            .ok_or(ValidationError::MissingScore)?;

        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange);
        }

        Ok(ValidatedPassportInput {
            address,
            score,
            transaction_id: self.transaction_id.filter(|tx| !tx.is_empty()),
        })
    }
}
