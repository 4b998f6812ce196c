//! API Module
//!
//! Local HTTP front end. Requests are translated into route events and
//! handed to the same [`Dispatcher`](crate::dispatch::Dispatcher) the
//! function runtime uses.
//!
//! # Endpoints
//! - `DELETE /passports/:address` - Delete a passport
//! - `GET /passports/:address` - Read one passport
//! - `GET /passports` - Read all passports
//! - `PUT /passports` - Create or update a passport
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
