// ABOUTME: Shopping list, item, provenance and pending-item models
// ABOUTME: Pending items are aggregator output awaiting user review before persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::{DayOfWeek, MealType, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contribution of one planned (recipe, slot) pair to an aggregated quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// Contributing recipe
    pub recipe_id: i64,
    /// Recipe name at aggregation time
    pub recipe_name: String,
    /// Day of the contributing slot
    pub day_of_week: DayOfWeek,
    /// Meal of the contributing slot
    pub meal_type: MealType,
    /// Servings planned for the slot
    pub servings: u32,
    /// Scaled quantity this slot adds to the total
    #[serde(rename = "quantity")]
    pub quantity_contributed: f64,
    /// Quantity written on the recipe line for its base servings
    #[serde(rename = "original_quantity")]
    pub original_quantity: f64,
}

/// Aggregated, not yet persisted, shopping-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingItem {
    /// Catalog ingredient, absent for free-text entries
    pub ingredient_id: Option<i64>,
    /// Display name
    pub name: String,
    /// Total quantity, rounded to 2 decimal places
    pub quantity: f64,
    /// Unit shared by every contribution
    pub unit: String,
    /// Whether the entry was typed by the user rather than aggregated
    pub is_manual: bool,
    /// Per-recipe breakdown in encounter order
    #[serde(default)]
    pub recipe_details: Vec<RecipeDetail>,
}

/// A persisted shopping list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Item identifier
    pub id: i64,
    /// Owning list
    pub shopping_list_id: i64,
    /// Catalog ingredient, if any
    pub ingredient_id: Option<i64>,
    /// Display name
    pub name: String,
    /// Quantity (never negative)
    pub quantity: f64,
    /// Unit
    pub unit: String,
    /// Checked off while shopping
    pub is_checked: bool,
    /// Added by hand rather than generated from the plan
    pub is_manual: bool,
    /// Recipe provenance, absent for manual items
    pub recipe_details: Option<Vec<RecipeDetail>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A persisted shopping list with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// List identifier
    pub id: i64,
    /// Owner
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Whether shopping is done
    pub is_completed: bool,
    /// Items in insertion order
    pub items: Vec<ShoppingListItem>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
