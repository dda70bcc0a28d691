// ABOUTME: HTTP server lifecycle for the MyFood API
// ABOUTME: Binds the configured address, serves the router and shuts down on SIGINT or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use crate::resources::ServerResources;
use crate::routes::build_router;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP server over shared resources
pub struct MyFoodServer {
    resources: Arc<ServerResources>,
}

impl MyFoodServer {
    /// Create a server over the given resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Address the server binds to
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a socket address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let config = &self.resources.config;
        format!("{}:{}", config.http_host, config.http_port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", config.http_host, config.http_port))
    }

    /// Serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self) -> Result<()> {
        let addr = self.bind_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("MyFood API listening on http://{addr}");

        axum::serve(listener, build_router(self.resources))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("MyFood API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
