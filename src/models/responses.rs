//! Response DTOs for the passport handler
//!
//! Shapes of the bodies that are not a bare `Passport`.

use serde::Serialize;

use super::Passport;

/// Response body for the read-all route (GET /passports)
///
/// Keeps the table scan output layout: `Items`, `Count`, `ScannedCount`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanResponse {
    pub items: Vec<Passport>,
    pub count: usize,
    pub scanned_count: usize,
}

impl ScanResponse {
    /// Wraps every record returned by a scan.
    pub fn new(items: Vec<Passport>) -> Self {
        let count = items.len();
        Self {
            items,
            count,
            scanned_count: count,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
