//! Configuration Module
//!
//! Handles loading and managing handler configuration from environment variables.

use std::env;

use anyhow::{anyhow, Context};

/// Name of the managed table used when `TABLE_NAME` is unset.
pub const DEFAULT_TABLE_NAME: &str = "terra-passport-hackathon";

/// Which store implementation backs the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local HashMap
    Memory,
    /// Managed DynamoDB table
    DynamoDb,
}

impl StoreBackend {
    /// Parses a `STORE_BACKEND` value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Some(StoreBackend::Memory),
            "dynamodb" => Some(StoreBackend::DynamoDb),
            _ => None,
        }
    }
}

impl Default for StoreBackend {
    /// The function runtime persists to the table; local runs stay in memory.
    fn default() -> Self {
        if cfg!(feature = "lambda") {
            StoreBackend::DynamoDb
        } else {
            StoreBackend::Memory
        }
    }
}

/// Handler configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Table holding the passport records
    pub table_name: String,
    /// Store implementation
    pub store_backend: StoreBackend,
    /// HTTP server port for local runs
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TABLE_NAME` - Table name (default: terra-passport-hackathon)
    /// - `STORE_BACKEND` - `memory` or `dynamodb` (default: dynamodb with the
    ///   `lambda` feature, memory otherwise)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// # Errors
    /// Fails when `STORE_BACKEND` or `SERVER_PORT` is set to a value that
    /// cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).ok_or_else(|| {
                anyhow!(
                    "Unknown STORE_BACKEND {:?}, expected \"memory\" or \"dynamodb\"",
                    value
                )
            })?,
            Err(_) => StoreBackend::default(),
        };

        let server_port = match env::var("SERVER_PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid SERVER_PORT {:?}", value))?,
            Err(_) => 3000,
        };

        Ok(Self {
            table_name: env::var("TABLE_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            store_backend,
            server_port,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            store_backend: StoreBackend::default(),
            server_port: 3000,
        }
    }
}
