// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Bundles the database, the draft store and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::{DraftStore, ShoppingListPlanner};
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Storage
    pub database: Arc<Database>,
    /// Pending shopping-list drafts
    pub drafts: DraftStore,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources, sizing the draft store from configuration
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        Self {
            database: Arc::new(database),
            drafts: DraftStore::from_config(&config.drafts),
            config,
        }
    }

    /// Shopping list generation over these resources
    #[must_use]
    pub fn planner(&self) -> ShoppingListPlanner<'_> {
        ShoppingListPlanner::new(&self.database, &self.drafts)
    }
}
