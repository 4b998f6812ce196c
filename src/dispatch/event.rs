//! Event envelope
//!
//! Incoming route events and outgoing responses, in the JSON shape used by
//! an HTTP API gateway in front of a function.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PassportError, Result};

/// Path parameter carrying the owner address
pub const ADDRESS_PARAM: &str = "address";

// == Route Event ==
/// An invocation: route key plus path parameters and raw body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEvent {
    /// e.g. `GET /passports/{address}`
    pub route_key: String,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    /// Raw JSON text of the request body
    #[serde(default)]
    pub body: Option<String>,
}

impl RouteEvent {
    pub fn new(route_key: impl Into<String>) -> Self {
        Self {
            route_key: route_key.into(),
            ..Self::default()
        }
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `{address}` path parameter.
    pub fn address(&self) -> Result<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(ADDRESS_PARAM))
            .map(String::as_str)
            .ok_or(PassportError::MissingPathParameter(ADDRESS_PARAM))
    }

    /// Parses the body as JSON.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
            .ok_or_else(|| PassportError::InvalidPayload("body is empty".to_string()))?;
        serde_json::from_str(body).map_err(|e| PassportError::InvalidPayload(e.to_string()))
    }
}

// == Route Response ==
/// Response envelope: status, JSON-encoded body, headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub status_code: u16,
    /// JSON text
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl RouteResponse {
    /// Successful response whose body is the JSON encoding of `body`.
    pub fn ok(body: &serde_json::Value) -> Self {
        Self::new(200, body.to_string())
    }

    /// Failed response whose body is the error message as a JSON string.
    pub fn error(err: &PassportError) -> Self {
        Self::new(
            err.status_code(),
            serde_json::Value::String(err.to_string()).to_string(),
        )
    }

    fn new(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            body,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
        }
    }
}
