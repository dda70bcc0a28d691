// ABOUTME: Weekly plan to shopping list aggregation with serving-size scaling
// ABOUTME: Folds recipe lines into one pending item per (ingredient, unit) with recipe provenance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Shopping list aggregation
//!
//! Pure computation over already-loaded data: no I/O, no logging. Every planned
//! slot contributes `line.quantity * slot.servings / recipe.base_servings` of
//! each of its recipe's ingredients. Contributions sharing an ingredient and an
//! effective unit are summed into one [`PendingItem`]; different units are kept
//! apart since no unit conversion is attempted.
//!
//! Totals are accumulated at full `f64` precision and rounded once to two
//! decimal places when the item is emitted.

use crate::models::{round_quantity, Ingredient, PendingItem, Recipe, RecipeDetail, WeeklyPlanSlot};
use std::collections::HashMap;

/// Aggregation result together with what had to be left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// One item per (ingredient, effective unit), in order of first encounter
    pub items: Vec<PendingItem>,
    /// Slots whose recipe could not be resolved
    pub skipped_slots: usize,
    /// Recipe lines whose ingredient is missing from the catalog
    pub skipped_lines: usize,
}

struct Accumulator {
    ingredient_id: i64,
    name: String,
    unit: String,
    total: f64,
    details: Vec<RecipeDetail>,
}

impl Accumulator {
    fn into_pending_item(self) -> PendingItem {
        PendingItem {
            ingredient_id: Some(self.ingredient_id),
            name: self.name,
            quantity: round_quantity(self.total),
            unit: self.unit,
            is_manual: false,
            recipe_details: self.details,
        }
    }
}

/// Ratio between planned servings and the servings a recipe is written for
#[must_use]
pub fn serving_ratio(planned_servings: u32, base_servings: u32) -> f64 {
    f64::from(planned_servings) / f64::from(base_servings.max(1))
}

/// Aggregate planned slots into pending shopping-list items
#[must_use]
pub fn aggregate(
    slots: &[WeeklyPlanSlot],
    recipes_by_id: &HashMap<i64, Recipe>,
    ingredients_by_id: &HashMap<i64, Ingredient>,
) -> Vec<PendingItem> {
    aggregate_with_report(slots, recipes_by_id, ingredients_by_id).items
}

/// Aggregate planned slots, also reporting skipped slots and lines
#[must_use]
pub fn aggregate_with_report(
    slots: &[WeeklyPlanSlot],
    recipes_by_id: &HashMap<i64, Recipe>,
    ingredients_by_id: &HashMap<i64, Ingredient>,
) -> Aggregation {
    let mut index: HashMap<(i64, String), usize> = HashMap::new();
    let mut accumulators: Vec<Accumulator> = Vec::new();
    let mut skipped_slots = 0;
    let mut skipped_lines = 0;

    for slot in slots {
        let Some(recipe) = recipes_by_id.get(&slot.recipe_id) else {
            skipped_slots += 1;
            continue;
        };
        let ratio = serving_ratio(slot.servings, recipe.base_servings);

        for line in &recipe.lines {
            let Some(ingredient) = ingredients_by_id.get(&line.ingredient_id) else {
                skipped_lines += 1;
                continue;
            };
            // NaN fails this comparison too
            if !(line.quantity > 0.0) {
                skipped_lines += 1;
                continue;
            }

            let unit = line.effective_unit(ingredient).to_owned();
            let scaled = line.quantity * ratio;
            let detail = RecipeDetail {
                recipe_id: recipe.id,
                recipe_name: recipe.name.clone(),
                day_of_week: slot.day_of_week,
                meal_type: slot.meal_type,
                servings: slot.servings,
                quantity_contributed: round_quantity(scaled),
                original_quantity: line.quantity,
            };

            let key = (ingredient.id, unit);
            if let Some(&position) = index.get(&key) {
                let accumulator = &mut accumulators[position];
                accumulator.total += scaled;
                accumulator.details.push(detail);
            } else {
                index.insert(key.clone(), accumulators.len());
                accumulators.push(Accumulator {
                    ingredient_id: ingredient.id,
                    name: ingredient.name.clone(),
                    unit: key.1,
                    total: scaled,
                    details: vec![detail],
                });
            }
        }
    }

    Aggregation {
        items: accumulators
            .into_iter()
            .map(Accumulator::into_pending_item)
            .collect(),
        skipped_slots,
        skipped_lines,
    }
}
