// ABOUTME: Demo catalog, recipes and sample week used by the seed-demo-data binary
// ABOUTME: Seeding is idempotent: existing ingredients are reused and existing recipes re-synced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Demo data
//!
//! The catalog is looked up by name before anything is created, so running
//! the seeder twice leaves the database unchanged.

use crate::database::{Database, IngredientRequest, RecipeLineRequest, RecipeRequest, UpsertSlotRequest};
use crate::errors::{AppError, AppResult};
use crate::models::UserId;
use std::collections::HashMap;
use tracing::{debug, info};

/// Demo catalog ingredient
struct DemoIngredient {
    name: &'static str,
    unit: &'static str,
    category: &'static str,
}

/// Demo recipe with `(ingredient name, quantity, unit)` lines
struct DemoRecipe {
    name: &'static str,
    description: &'static str,
    instructions: &'static str,
    prep_time: i64,
    cook_time: i64,
    servings: i64,
    difficulty: &'static str,
    lines: &'static [(&'static str, f64, &'static str)],
}

const INGREDIENTS: &[DemoIngredient] = &[
    DemoIngredient { name: "Tomatoes", unit: "kg", category: "Vegetables" },
    DemoIngredient { name: "Onions", unit: "kg", category: "Vegetables" },
    DemoIngredient { name: "Garlic", unit: "head", category: "Vegetables" },
    DemoIngredient { name: "Pasta", unit: "g", category: "Grains" },
    DemoIngredient { name: "Rice", unit: "g", category: "Grains" },
    DemoIngredient { name: "Chicken breast", unit: "g", category: "Meat" },
    DemoIngredient { name: "Ground beef", unit: "g", category: "Meat" },
    DemoIngredient { name: "Eggs", unit: "piece", category: "Dairy" },
    DemoIngredient { name: "Milk", unit: "L", category: "Dairy" },
    DemoIngredient { name: "Butter", unit: "g", category: "Dairy" },
    DemoIngredient { name: "Olive oil", unit: "mL", category: "Oils" },
    DemoIngredient { name: "Salt", unit: "g", category: "Spices" },
    DemoIngredient { name: "Pepper", unit: "g", category: "Spices" },
    DemoIngredient { name: "Basil", unit: "g", category: "Herbs" },
    DemoIngredient { name: "Carrots", unit: "kg", category: "Vegetables" },
    DemoIngredient { name: "Potatoes", unit: "kg", category: "Vegetables" },
    DemoIngredient { name: "Zucchini", unit: "kg", category: "Vegetables" },
    DemoIngredient { name: "Grated cheese", unit: "g", category: "Dairy" },
];

const PASTA_WITH_TOMATO: &str = "Pasta with tomato sauce";
const CHICKEN_RICE: &str = "Chicken and rice";
const BEEF_STEW: &str = "Beef stew";

const RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        name: PASTA_WITH_TOMATO,
        description: "Simple pasta with a fresh tomato sauce",
        instructions: "1. Cook the pasta in salted water.\n\
                       2. Soften the onion and garlic in olive oil.\n\
                       3. Add the diced tomatoes and simmer for 15 minutes.\n\
                       4. Season, add the basil and toss with the pasta.",
        prep_time: 10,
        cook_time: 20,
        servings: 4,
        difficulty: "easy",
        lines: &[
            ("Pasta", 400.0, "g"),
            ("Tomatoes", 0.5, "kg"),
            ("Onions", 0.1, "kg"),
            ("Garlic", 1.0, "head"),
            ("Olive oil", 30.0, "mL"),
            ("Basil", 10.0, "g"),
            ("Salt", 5.0, "g"),
            ("Pepper", 2.0, "g"),
        ],
    },
    DemoRecipe {
        name: CHICKEN_RICE,
        description: "Pan-fried chicken breast with rice and vegetables",
        instructions: "1. Cook the rice.\n\
                       2. Dice the chicken and brown it in olive oil.\n\
                       3. Add the onion and sliced carrots and cook for 10 minutes.\n\
                       4. Season and serve with the rice.",
        prep_time: 15,
        cook_time: 25,
        servings: 4,
        difficulty: "medium",
        lines: &[
            ("Rice", 300.0, "g"),
            ("Chicken breast", 500.0, "g"),
            ("Carrots", 0.2, "kg"),
            ("Onions", 0.1, "kg"),
            ("Olive oil", 20.0, "mL"),
            ("Salt", 5.0, "g"),
            ("Pepper", 2.0, "g"),
        ],
    },
    DemoRecipe {
        name: BEEF_STEW,
        description: "Slow-cooked beef with potatoes and carrots",
        instructions: "1. Brown the beef in olive oil.\n\
                       2. Add the onions, carrots and potatoes.\n\
                       3. Add the tomatoes and cover with water.\n\
                       4. Simmer for 45 minutes and season.",
        prep_time: 20,
        cook_time: 45,
        servings: 6,
        difficulty: "medium",
        lines: &[
            ("Ground beef", 600.0, "g"),
            ("Potatoes", 0.5, "kg"),
            ("Carrots", 0.3, "kg"),
            ("Onions", 0.2, "kg"),
            ("Tomatoes", 0.3, "kg"),
            ("Olive oil", 30.0, "mL"),
            ("Salt", 8.0, "g"),
            ("Pepper", 3.0, "g"),
        ],
    },
];

/// `(day, meal, recipe name, servings)` of the sample week
const DEMO_WEEK: &[(&str, &str, &str, i64)] = &[
    ("monday", "dinner", PASTA_WITH_TOMATO, 4),
    ("tuesday", "lunch", CHICKEN_RICE, 2),
    ("wednesday", "dinner", BEEF_STEW, 6),
    ("friday", "dinner", PASTA_WITH_TOMATO, 2),
];

/// Counts reported after a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Ingredients inserted by this run
    pub ingredients_created: usize,
    /// Recipes inserted by this run
    pub recipes_created: usize,
    /// Existing recipes whose lines were re-synced
    pub recipes_updated: usize,
    /// Plan slots written for the demo user
    pub plan_slots: usize,
}

/// Seed the demo catalog and recipes, plus a sample week when `user_id` is set
///
/// # Errors
///
/// Returns an error if any insert or lookup fails
pub async fn seed(database: &Database, user_id: Option<UserId>) -> AppResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    let ingredient_ids = seed_ingredients(database, &mut summary).await?;
    let recipe_ids = seed_recipes(database, &ingredient_ids, &mut summary).await?;
    if let Some(user_id) = user_id {
        summary.plan_slots = seed_week(database, user_id, &recipe_ids).await?;
    }
    info!(
        ingredients_created = summary.ingredients_created,
        recipes_created = summary.recipes_created,
        recipes_updated = summary.recipes_updated,
        plan_slots = summary.plan_slots,
        "Demo data seeded"
    );
    Ok(summary)
}

async fn seed_ingredients(
    database: &Database,
    summary: &mut SeedSummary,
) -> AppResult<HashMap<&'static str, i64>> {
    let manager = database.ingredients();
    let mut ids = HashMap::with_capacity(INGREDIENTS.len());
    for demo in INGREDIENTS {
        let id = if let Some(existing) = manager.find_by_name(demo.name).await? {
            debug!(ingredient = demo.name, "Ingredient already present");
            existing.id
        } else {
            let request = IngredientRequest {
                name: demo.name.to_owned(),
                unit: demo.unit.to_owned(),
                category: Some(demo.category.to_owned()),
            };
            summary.ingredients_created += 1;
            manager.create(&request).await?.id
        };
        ids.insert(demo.name, id);
    }
    Ok(ids)
}

async fn seed_recipes(
    database: &Database,
    ingredient_ids: &HashMap<&'static str, i64>,
    summary: &mut SeedSummary,
) -> AppResult<HashMap<&'static str, i64>> {
    let manager = database.recipes();
    let mut ids = HashMap::with_capacity(RECIPES.len());
    for demo in RECIPES {
        let request = recipe_request(demo, ingredient_ids)?;
        let id = match manager.find_by_name(demo.name).await? {
            Some(existing) => {
                manager.update(existing.id, &request).await?;
                summary.recipes_updated += 1;
                existing.id
            }
            None => {
                summary.recipes_created += 1;
                manager.create(&request).await?.id
            }
        };
        ids.insert(demo.name, id);
    }
    Ok(ids)
}

fn recipe_request(
    demo: &DemoRecipe,
    ingredient_ids: &HashMap<&'static str, i64>,
) -> AppResult<RecipeRequest> {
    let ingredients = demo
        .lines
        .iter()
        .map(|(name, quantity, unit)| {
            let ingredient_id = ingredient_ids
                .get(name)
                .copied()
                .ok_or_else(|| AppError::internal(format!("Demo ingredient {name} was not seeded")))?;
            Ok(RecipeLineRequest {
                ingredient_id: Some(ingredient_id),
                quantity: Some(*quantity),
                unit: Some((*unit).to_owned()),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(RecipeRequest {
        name: demo.name.to_owned(),
        description: Some(demo.description.to_owned()),
        instructions: demo.instructions.to_owned(),
        prep_time: Some(demo.prep_time),
        cook_time: Some(demo.cook_time),
        servings: demo.servings,
        difficulty: demo.difficulty.to_owned(),
        ingredients,
    })
}

async fn seed_week(
    database: &Database,
    user_id: UserId,
    recipe_ids: &HashMap<&'static str, i64>,
) -> AppResult<usize> {
    let manager = database.weekly_plans();
    let mut written = 0;
    for (day, meal, recipe, servings) in DEMO_WEEK {
        let recipe_id = recipe_ids
            .get(recipe)
            .copied()
            .ok_or_else(|| AppError::internal(format!("Demo recipe {recipe} was not seeded")))?;
        let request = UpsertSlotRequest {
            day_of_week: (*day).to_owned(),
            meal_type: (*meal).to_owned(),
            recipe_id: Some(recipe_id),
            servings: Some(*servings),
        };
        manager.upsert(user_id, &request).await?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_recipe_line_names_a_catalog_ingredient() {
        for recipe in RECIPES {
            for (name, quantity, _) in recipe.lines {
                assert!(
                    INGREDIENTS.iter().any(|i| i.name == *name),
                    "{} uses unknown ingredient {name}",
                    recipe.name
                );
                assert!(*quantity > 0.0);
            }
        }
    }

    #[test]
    fn test_demo_week_uses_known_recipes() {
        for (_, _, recipe, servings) in DEMO_WEEK {
            assert!(RECIPES.iter().any(|r| r.name == *recipe));
            assert!(*servings >= 1);
        }
    }
}
