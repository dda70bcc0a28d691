// ABOUTME: HTTP server binary for the MyFood meal planning API
// ABOUTME: Loads configuration from the environment, opens the database and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! # MyFood API Server Binary
//!
//! Starts the catalog, recipe, planning and shopping list API on SQLite.

use anyhow::Result;
use clap::Parser;
use myfood::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server::MyFoodServer,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "myfood-server")]
#[command(about = "MyFood - weekly meal planning and shopping list API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(database_url)?;
    }
    config.validate()?;

    logging::init_from_env()?;

    info!("Starting MyFood API server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database ready at {}", config.database_url);

    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    let server = MyFoodServer::new(resources);

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return Err(e);
    }

    info!("Server stopped");
    Ok(())
}
