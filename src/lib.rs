// ABOUTME: Main library entry point for the MyFood meal planning service
// ABOUTME: Exposes the catalog, recipe, weekly plan and shopping list API and its building blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

#![deny(unsafe_code)]

//! # MyFood
//!
//! Weekly meal planning over a shared ingredient catalog and recipe book, with
//! shopping lists generated from the week's plan.
//!
//! ## Architecture
//!
//! - **Models**: plain data types shared by every layer
//! - **Database**: sqlx/SQLite storage with one manager per aggregate
//! - **Services**: the pure aggregator, the draft store and the generation workflow
//! - **Routes**: axum handlers behind tracing and CORS layers
//! - **Config**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use myfood::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("MyFood configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Defaults, limits and header names
pub mod constants;

/// SQLite storage and per-aggregate managers
pub mod database;

/// Demo catalog and sample week for local development
pub mod demo_data;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain data models
pub mod models;

/// Shared resources for route handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// HTTP server lifecycle
pub mod server;

/// Aggregation, drafts and the generation workflow
pub mod services;
