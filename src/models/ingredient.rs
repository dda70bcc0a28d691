// ABOUTME: Ingredient catalog model with default unit and optional category
// ABOUTME: Referenced by recipe lines and, optionally, by shopping list items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog identifier
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Unit used when a recipe line does not name one
    #[serde(rename = "unit")]
    pub default_unit: String,
    /// Optional grouping such as "vegetables"
    pub category: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
