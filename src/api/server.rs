//! API server using Axum
//!
//! Hosts the demo order endpoints with the interceptors wired in.

use std::net::SocketAddr;
use std::time::Instant;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::interceptor::Interceptors;

use super::routes;
use super::store::OrderStore;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub interceptors: Interceptors,
    pub orders: OrderStore,
    pub started_at: Instant,
}

/// API server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ServerConfig, interceptors: Interceptors) -> Self {
        let state = AppState {
            interceptors,
            orders: OrderStore::new(),
            started_at: Instant::now(),
        };

        Self { config, state }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    /// Run the API server
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("Invalid API server address: {}", e)))?;

        let router = self.build_router();

        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        info!("API server shut down");
        Ok(())
    }
}
