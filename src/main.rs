//! Log Interceptors demo server - Entry Point
//!
//! Starts the order API with the interceptors selected by configuration and
//! shuts down gracefully on Ctrl+C or SIGTERM.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use log_interceptors::api::ApiServer;
use log_interceptors::{logging, Config, Interceptors, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    logging::init(&config)?;
    info!("Starting log-interceptors demo server");
    info!(
        "Method-call logging: enabled={} filter={} level={}",
        config.logging.method.enabled(),
        config.logging.method.filter_level(),
        config.logging.method.log_level()
    );
    info!(
        "HTTP logging: enabled={} filter={} level={} max_body_bytes={}",
        config.logging.http.enabled(),
        config.logging.http.filter_level(),
        config.logging.http.log_level(),
        config.logging.http_body_limit
    );

    let interceptors = Interceptors::from_config(&config.logging);
    let api_server = ApiServer::new(config.server.clone(), interceptors);

    let (shutdown_tx, _) = watch::channel(false);
    let api_shutdown = shutdown_tx.subscribe();

    let api_task = tokio::spawn(async move {
        if let Err(e) = api_server.run(api_shutdown).await {
            error!("API server error: {}", e);
        }
    });

    info!("Server started - API: {}", config.server_addr());

    // Wait for shutdown signal
    shutdown_signal().await;
    info!("Shutdown signal received");

    let _ = shutdown_tx.send(true);
    let _ = api_task.await;

    info!("Log interceptors demo server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
}
