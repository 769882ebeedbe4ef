//! careerchat-server - HTTP backend for the careers service chatbot
//!
//! Wires together the core library: opens the database, picks the FAQ
//! backend, builds the chat and analytics services, and serves the REST
//! surface until SIGINT/SIGTERM.

mod error;
mod routes;
mod session;

use anyhow::Context;
use careerchat_core::analytics::Aggregator;
use careerchat_core::chat::{ChatService, ModelClient};
use careerchat_core::faq::{FaqStore, FileFaqStore, SqliteFaqStore};
use careerchat_core::interactions::InteractionLog;
use careerchat_core::{logging, Config, Database};
use clap::Parser;
use routes::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "careerchat-server", about = "Careers service chatbot backend", version)]
struct Args {
    /// Path to the config file (defaults to the XDG config location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load config")?,
        None => Config::load().context("failed to load config")?,
    };

    let _logging_guard = logging::init(&config.logging).context("failed to initialize logging")?;

    let db = Arc::new(
        Database::open(&config.database_path()).context("failed to open database")?,
    );
    db.migrate().context("failed to run migrations")?;

    let log = Arc::new(
        InteractionLog::new(db.clone(), &config.analytics)
            .context("failed to build interaction log")?,
    );
    let aggregator = Arc::new(Aggregator::new(log.clone(), &config.analytics));

    // Flat-file FAQ dataset when configured, otherwise the SQLite table
    let faq: Arc<dyn FaqStore> = match &config.store.faq_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file FAQ store");
            Arc::new(FileFaqStore::open(path.clone()).context("failed to open FAQ file")?)
        }
        None => Arc::new(SqliteFaqStore::new(db.clone())),
    };

    let model = ModelClient::from_config(&config.model).context("failed to build model client")?;
    if model.is_none() {
        tracing::warn!("No answer service configured; chat runs FAQ-only");
    }
    let chat = Arc::new(ChatService::new(log, faq.clone(), model));

    let state = AppState {
        chat,
        aggregator,
        faq,
    };

    let app = routes::build_router(state, &config.server.allowed_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
