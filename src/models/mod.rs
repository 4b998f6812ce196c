//! Record and payload models
//!
//! The persisted `Passport` record plus the DTOs used to read the
//! create-or-update payload and to shape response bodies.

pub mod passport;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use passport::Passport;
pub use requests::{PassportRequest, ValidatedPassportInput, MAX_SCORE, MIN_SCORE};
pub use responses::{HealthResponse, ScanResponse};
