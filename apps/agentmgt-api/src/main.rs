//! Agent management API server.
//!
//! Loads configuration, initializes logging, selects the access gate and
//! serves the API until SIGINT/SIGTERM.

use std::net::SocketAddr;

use agentmgt_api::{app, config::Config, logging};
use agentmgt_api_agents::AgentsState;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    // Missing .env is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("FATAL: Configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging(&config.rust_log, config.log_format) {
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }

    info!(
        app_env = %config.app_env,
        bind_addr = %config.bind_addr(),
        "Starting agent management API"
    );

    let gate = match app::build_gate(&config) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("Failed to initialize access gate: {e}");
            std::process::exit(1);
        }
    };

    let state = AgentsState::in_memory(gate);
    let router = app::build_app(state);

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
