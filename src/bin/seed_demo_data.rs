// ABOUTME: Demo data seeder for the MyFood meal planning API
// ABOUTME: Fills the catalog with common ingredients and three recipes, optionally planning a week
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Demo data seeder for MyFood.
//!
//! Usage:
//! ```bash
//! # Seed the catalog and recipes
//! cargo run --bin seed-demo-data
//!
//! # Also plan a sample week for user 1
//! cargo run --bin seed-demo-data -- --user-id 1
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use anyhow::Result;
use clap::Parser;
use myfood::{config::DatabaseUrl, constants::defaults, database::Database, demo_data};
use std::env;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "MyFood Demo Data Seeder",
    long_about = "Populate the database with a demo ingredient catalog, recipes and an optional planned week"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// User to plan the sample week for
    #[arg(long)]
    user_id: Option<i64>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== MyFood Demo Data Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
    let database_url = DatabaseUrl::parse_url(&database_url)?;
    if database_url.is_memory() {
        anyhow::bail!("Seeding an in-memory database has no lasting effect");
    }

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url).await?;

    let summary = demo_data::seed(&database, args.user_id).await?;

    info!("=== Seeding Complete ===");
    info!("  Ingredients created: {}", summary.ingredients_created);
    info!("  Recipes created: {}", summary.recipes_created);
    info!("  Recipes re-synced: {}", summary.recipes_updated);
    if let Some(user_id) = args.user_id {
        info!("  Planned slots for user {}: {}", user_id, summary.plan_slots);
    }
    Ok(())
}
