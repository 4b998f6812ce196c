//! Passport API - serverless CRUD handler for passport records
//!
//! Runs either as a local HTTP server or, with the `lambda` feature, inside
//! the function runtime.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use passport_api::{build_dispatcher, Config};

fn init_tracing() {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passport_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Main entry point for the local HTTP server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the passport store and build the dispatcher
/// 4. Start HTTP server on configured port
/// 5. Handle graceful shutdown on SIGINT/SIGTERM
#[cfg(not(feature = "lambda"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::net::SocketAddr;

    use passport_api::api::create_router;
    use passport_api::AppState;

    init_tracing();
    info!("Starting Passport API server");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: table={}, backend={:?}, port={}",
        config.table_name, config.store_backend, config.server_port
    );

    let dispatcher = build_dispatcher(&config).await?;
    let app = create_router(AppState { dispatcher });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Main entry point inside the function runtime.
///
/// The store handle is created once per process and reused by every invocation.
#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    init_tracing();

    let config = Config::from_env().map_err(|e| lambda_runtime::Error::from(e.to_string()))?;
    info!(
        "Configuration loaded: table={}, backend={:?}",
        config.table_name, config.store_backend
    );

    let dispatcher = build_dispatcher(&config)
        .await
        .map_err(|e| lambda_runtime::Error::from(e.to_string()))?;

    passport_api::lambda::run(dispatcher).await
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
#[cfg(not(feature = "lambda"))]
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
