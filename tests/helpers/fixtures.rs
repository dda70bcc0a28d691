// ABOUTME: In-memory database and router fixtures shared by integration tests
// ABOUTME: Builds catalog entries, recipes and planned slots with minimal boilerplate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

#![allow(dead_code)]

use axum::Router;
use myfood::{
    config::ServerConfig,
    database::{Database, IngredientRequest, RecipeLineRequest, RecipeRequest, UpsertSlotRequest},
    models::{Ingredient, Recipe, WeeklyPlanSlot},
    resources::ServerResources,
    routes::build_router,
};
use std::sync::Arc;

/// Default test user
pub const USER: i64 = 1;
/// Second user for isolation checks
pub const OTHER_USER: i64 = 2;

/// Fresh in-memory database with the schema applied
pub async fn test_database() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to create in-memory database")
}

/// Resources over a fresh in-memory database and default configuration
pub async fn test_resources() -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        test_database().await,
        Arc::new(ServerConfig::default()),
    ))
}

/// Full application router over the given resources
pub fn test_app(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}

/// Insert a catalog ingredient
pub async fn ingredient(database: &Database, name: &str, unit: &str) -> Ingredient {
    database
        .ingredients()
        .create(&IngredientRequest {
            name: name.to_owned(),
            unit: unit.to_owned(),
            category: None,
        })
        .await
        .expect("Failed to create ingredient")
}

/// Insert a recipe from `(ingredient id, quantity, unit)` lines
pub async fn recipe(
    database: &Database,
    name: &str,
    servings: i64,
    lines: &[(i64, f64, Option<&str>)],
) -> Recipe {
    database
        .recipes()
        .create(&recipe_request(name, servings, lines))
        .await
        .expect("Failed to create recipe")
}

/// Build a valid recipe request
pub fn recipe_request(
    name: &str,
    servings: i64,
    lines: &[(i64, f64, Option<&str>)],
) -> RecipeRequest {
    RecipeRequest {
        name: name.to_owned(),
        description: None,
        instructions: "Cook it.".to_owned(),
        prep_time: Some(10),
        cook_time: Some(20),
        servings,
        difficulty: "easy".to_owned(),
        ingredients: lines
            .iter()
            .map(|(ingredient_id, quantity, unit)| RecipeLineRequest {
                ingredient_id: Some(*ingredient_id),
                quantity: Some(*quantity),
                unit: unit.map(str::to_owned),
            })
            .collect(),
    }
}

/// Plan a recipe into a slot
pub async fn plan(
    database: &Database,
    user_id: i64,
    day: &str,
    meal: &str,
    recipe_id: i64,
    servings: i64,
) -> WeeklyPlanSlot {
    database
        .weekly_plans()
        .upsert(
            user_id,
            &UpsertSlotRequest {
                day_of_week: day.to_owned(),
                meal_type: meal.to_owned(),
                recipe_id: Some(recipe_id),
                servings: Some(servings),
            },
        )
        .await
        .expect("Failed to plan slot")
}

/// Compare quantities at the persisted precision
pub fn assert_quantity(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected quantity {expected}, got {actual}"
    );
}
