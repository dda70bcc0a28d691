// ABOUTME: System-wide constants and defaults for the MyFood service
// ABOUTME: Holds configuration defaults, validation limits and HTTP header names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! # Constants Module
//!
//! Hardcoded defaults used when the environment does not override them, plus
//! the field limits enforced by request validation.

/// Service identity used in logs
pub mod service_names {
    /// Name of the HTTP server binary
    pub const MYFOOD_SERVER: &str = "myfood-server";
}

/// Defaults applied by `ServerConfig::from_env`
pub mod defaults {
    /// Interface the HTTP server binds to
    pub const HTTP_HOST: &str = "127.0.0.1";
    /// Port the HTTP server listens on
    pub const HTTP_PORT: u16 = 8080;
    /// On-disk SQLite database
    pub const DATABASE_URL: &str = "sqlite:./data/myfood.db";
    /// Lifetime of a pending shopping-list draft
    pub const DRAFT_TTL_SECS: u64 = 900;
    /// Maximum number of live drafts held in memory
    pub const DRAFT_MAX_ENTRIES: usize = 1000;
    /// Result cap for ingredient type-ahead search
    pub const INGREDIENT_SEARCH_LIMIT: u32 = 10;
    /// Name given to a shopping list created without one
    pub const SHOPPING_LIST_NAME: &str = "Shopping list";
}

/// Field limits enforced on incoming requests
pub mod limits {
    /// Ingredient and recipe name length
    pub const NAME_MAX_LEN: usize = 255;
    /// Ingredient default unit length
    pub const UNIT_MAX_LEN: usize = 50;
    /// Ingredient category length
    pub const CATEGORY_MAX_LEN: usize = 100;
    /// Decimal places kept for persisted quantities
    pub const QUANTITY_DECIMALS: i32 = 2;
}

/// HTTP header names
pub mod headers {
    /// Header carrying the caller's user id, set by the fronting gateway
    pub const USER_ID: &str = "x-user-id";
}
