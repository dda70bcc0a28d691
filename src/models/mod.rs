// ABOUTME: Domain data models for the MyFood meal planner
// ABOUTME: Re-exports catalog, recipe, weekly plan and shopping list types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! # Data Models
//!
//! Plain data types shared by the storage layer, the aggregation service and
//! the HTTP routes. Enumerations carry their own string encoding so rows and
//! JSON payloads agree on the same spelling.

/// Ingredient catalog entries
pub mod ingredient;
/// Weekly plan slots, days and meal types
pub mod planning;
/// Recipes and their ingredient lines
pub mod recipe;
/// Shopping lists, items, provenance and pending items
pub mod shopping;

pub use ingredient::Ingredient;
pub use planning::{DayOfWeek, MealType, WeeklyPlanSlot};
pub use recipe::{Difficulty, Recipe, RecipeLine};
pub use shopping::{PendingItem, RecipeDetail, ShoppingList, ShoppingListItem};

use crate::constants::limits::QUANTITY_DECIMALS;

/// Identifier of the user owning plans and shopping lists
pub type UserId = i64;

/// Round a quantity to the persisted precision (2 decimal places)
///
/// Values too large to scale have no fractional part and are returned as is.
#[must_use]
pub fn round_quantity(value: f64) -> f64 {
    let factor = 10_f64.powi(QUANTITY_DECIMALS);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}
