//! Dispatch Module
//!
//! Maps a route-key-tagged event onto one of the four passport operations
//! and wraps the outcome in a JSON response envelope.
//!
//! # Routes
//! - `DELETE /passports/{address}` - Delete by address
//! - `GET /passports/{address}` - Read one by address
//! - `GET /passports` - Read all
//! - `PUT /passports` - Create or update

pub mod dispatcher;
pub mod event;
pub mod route;

pub use dispatcher::Dispatcher;
pub use event::{RouteEvent, RouteResponse};
pub use route::Route;
