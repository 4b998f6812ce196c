//! API Handlers
//!
//! Turn axum requests into [`RouteEvent`]s and [`RouteResponse`]s back into
//! HTTP responses.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::dispatch::event::ADDRESS_PARAM;
use crate::dispatch::{Dispatcher, RouteEvent, RouteResponse};
use crate::models::HealthResponse;
use crate::passports::PassportService;
use crate::store::{InMemoryStore, PassportStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Creates state backed by the given store and the wall clock.
    pub fn from_store(store: Arc<dyn PassportStore>) -> Self {
        Self::new(Dispatcher::new(PassportService::new(store)))
    }

    /// Creates state backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}

/// Handler for any method on /passports
pub async fn collection_handler(
    State(state): State<AppState>,
    method: Method,
    body: String,
) -> RouteResponse {
    let event = with_body(RouteEvent::new(format!("{} /passports", method)), body);
    state.dispatcher.dispatch(event).await
}

/// Handler for any method on /passports/:address
pub async fn item_handler(
    State(state): State<AppState>,
    method: Method,
    Path(address): Path<String>,
    body: String,
) -> RouteResponse {
    let event = RouteEvent::new(format!("{} /passports/{{address}}", method))
        .with_path_parameter(ADDRESS_PARAM, address);
    state.dispatcher.dispatch(with_body(event, body)).await
}

/// Fallback for every other path; the dispatcher rejects the route key.
pub async fn fallback_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: String,
) -> RouteResponse {
    let event = with_body(RouteEvent::new(format!("{} {}", method, uri.path())), body);
    state.dispatcher.dispatch(event).await
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn with_body(event: RouteEvent, body: String) -> RouteEvent {
    if body.is_empty() {
        event
    } else {
        event.with_body(body)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }

        response
    }
}
