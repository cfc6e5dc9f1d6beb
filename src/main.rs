//! TODO manager entry point.

use std::process::ExitCode;

use todo_manager::api::{AppState, create_router};
use todo_manager::infrastructure::{AppConfig, RepositoryFactory};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TODO manager...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        host = %config.app_host,
        port = config.app_port,
        storage = ?config.storage_mode,
        max_unfinished = config.max_unfinished,
        "Configuration loaded"
    );

    let repository = match RepositoryFactory::new(config.clone()).create().await {
        Ok(repository) => repository,
        Err(error) => {
            tracing::error!("Failed to initialise storage: {error}");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(repository, config.max_unfinished) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Failed to compile templates: {error}");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let bind_address = config.bind_address();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!("Failed to bind {bind_address}: {error}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("TODO manager listening on http://{bind_address}/todos");

    if let Err(error) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    tracing::info!("TODO manager stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {error}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
