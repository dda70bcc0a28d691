// ABOUTME: Shopping list generation workflow from a user's weekly plan
// ABOUTME: Loads slots, recipes and ingredients, aggregates them and stores a reviewable draft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::aggregator::aggregate_with_report;
use super::drafts::{DraftStore, ShoppingListDraft};
use crate::database::Database;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::models::UserId;
use std::collections::BTreeSet;

/// Result of a generation request
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// The user has nothing planned; not an error
    NoPlannedMeals,
    /// Aggregated items are waiting for review under the draft id
    Draft(ShoppingListDraft),
}

/// Turns weekly plans into shopping-list drafts
pub struct ShoppingListPlanner<'a> {
    database: &'a Database,
    drafts: &'a DraftStore,
}

impl<'a> ShoppingListPlanner<'a> {
    /// Create a planner over the given storage and draft store
    #[must_use]
    pub const fn new(database: &'a Database, drafts: &'a DraftStore) -> Self {
        Self { database, drafts }
    }

    /// Aggregate the user's planned meals into a new draft
    ///
    /// A plan whose recipes carry no lines still yields a draft, with no items.
    ///
    /// # Errors
    ///
    /// Returns an error if loading slots, recipes or ingredients fails
    pub async fn generate(&self, user_id: UserId) -> AppResult<GenerateOutcome> {
        let slots = self.database.weekly_plans().list_for_user(user_id).await?;
        if slots.is_empty() {
            return Ok(GenerateOutcome::NoPlannedMeals);
        }

        let recipe_ids: Vec<i64> = slots
            .iter()
            .map(|slot| slot.recipe_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let recipes = self.database.recipes().find_many(&recipe_ids).await?;

        let ingredient_ids: Vec<i64> = recipes
            .values()
            .flat_map(|recipe| recipe.lines.iter().map(|line| line.ingredient_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ingredients = self.database.ingredients().find_many(&ingredient_ids).await?;

        let aggregation = aggregate_with_report(&slots, &recipes, &ingredients);
        AppLogger::log_aggregation(
            user_id,
            slots.len(),
            aggregation.items.len(),
            aggregation.skipped_slots,
        );

        Ok(GenerateOutcome::Draft(
            self.drafts.insert(user_id, aggregation.items),
        ))
    }
}
