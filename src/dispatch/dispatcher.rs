//! Request Dispatcher
//!
//! Single entry point for every invocation. Never fails: any error raised by
//! an operation is turned into a 400 response.

use serde_json::Value;
use tracing::{debug, warn};

use super::event::{RouteEvent, RouteResponse};
use super::route::Route;
use crate::error::{PassportError, Result};
use crate::models::{PassportRequest, ScanResponse};
use crate::passports::PassportService;

// == Dispatcher ==
#[derive(Clone)]
pub struct Dispatcher {
    passports: PassportService,
}

impl Dispatcher {
    pub fn new(passports: PassportService) -> Self {
        Self { passports }
    }

    /// Handles one event and returns its response envelope.
    pub async fn dispatch(&self, event: RouteEvent) -> RouteResponse {
        match self.execute(&event).await {
            Ok(body) => RouteResponse::ok(&body),
            Err(err) => {
                warn!("Route {} failed: {}", event.route_key, err);
                RouteResponse::error(&err)
            }
        }
    }

    async fn execute(&self, event: &RouteEvent) -> Result<Value> {
        let route = Route::from_route_key(&event.route_key)
            .ok_or_else(|| PassportError::UnsupportedRoute(event.route_key.clone()))?;
        debug!("Executing {}", route);

        match route {
            Route::DeletePassport => {
                let address = event.address()?;
                self.passports.delete(address).await?;
                Ok(Value::String(format!("Deleted item {}", address)))
            }
            Route::GetPassport => {
                let passport = self.passports.get(event.address()?).await?;
                Ok(serde_json::to_value(passport)?)
            }
            Route::ListPassports => {
                let passports = self.passports.list().await?;
                Ok(serde_json::to_value(ScanResponse::new(passports))?)
            }
            Route::PutPassport => {
                let input = event.json_body::<PassportRequest>()?.validate()?;
                let passport = self.passports.create_or_update(input).await?;
                Ok(serde_json::to_value(passport)?)
            }
        }
    }
}
