//! # Tender API
//!
//! HTTP server for the change engine.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  env ──► ApiConfig::load ──► denomination table (file or US default)   │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  TENDER_DATABASE_PATH set? ── yes ──► Database::new (+ migrations)     │
//! │                 │                         │ fails: warn, no storage    │
//! │                 no: no storage            ▼                             │
//! │                 └──────────────► axum::serve(0.0.0.0:3001)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tender_api::{router, ApiConfig, AppState};
use tender_core::{ChangeCalculator, ChangeRules};
use tender_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Tender API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    let table = config.load_denominations()?;
    info!(
        port = config.port,
        divisor = config.random_divisor,
        denominations = table.len(),
        "Configuration loaded"
    );

    let db = match &config.database_path {
        Some(path) => match Database::new(DbConfig::new(path)).await {
            Ok(db) => {
                info!("Database initialized, transactions will be saved");
                Some(db)
            }
            Err(e) => {
                warn!(error = %e, "Could not open database, transactions will not be saved");
                None
            }
        },
        None => {
            warn!("TENDER_DATABASE_PATH not set, transactions will not be persisted");
            None
        }
    };

    let calculator = ChangeCalculator::new(table, ChangeRules::with_divisor(config.random_divisor));
    let app = router(AppState::new(calculator, db.clone(), config.max_input_bytes));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    if let Some(db) = db {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (one line per batch)
/// - Default: INFO, with sqlx at WARN
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tender=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
