//! Function runtime entry
//!
//! Serves route events from the Lambda runtime API with a shared dispatcher.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::info;

use crate::dispatch::{Dispatcher, RouteEvent, RouteResponse};

/// Runs the invocation loop until the runtime shuts the process down.
pub async fn run(dispatcher: Arc<Dispatcher>) -> Result<(), Error> {
    info!("Starting function runtime loop");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<RouteEvent>| {
        let dispatcher = dispatcher.clone();
        async move {
            info!("Invocation {} for {}", event.context.request_id, event.payload.route_key);
            Ok::<RouteResponse, Error>(dispatcher.dispatch(event.payload).await)
        }
    }))
    .await
}
