//! Passport API - serverless CRUD handler for passport records
//!
//! Dispatches route events (create-or-update, read-one, read-all, delete)
//! onto a key-value table of passports keyed by owner address.

pub mod api;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod passports;
pub mod store;

#[cfg(feature = "lambda")]
pub mod lambda;

use std::sync::Arc;

pub use api::AppState;
pub use config::Config;
pub use dispatch::{Dispatcher, RouteEvent, RouteResponse};
pub use error::{PassportError, ValidationError};
pub use models::Passport;
pub use passports::PassportService;

/// Connects the configured store once and builds the dispatcher around it.
pub async fn build_dispatcher(config: &Config) -> anyhow::Result<Arc<Dispatcher>> {
    let store = store::connect(config).await?;
    Ok(Arc::new(Dispatcher::new(PassportService::new(store))))
}
