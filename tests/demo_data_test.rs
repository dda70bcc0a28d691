// ABOUTME: Integration tests for the demo data seeder
// ABOUTME: Verifies idempotent seeding and that the sample week generates a usable draft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::{assert_quantity, test_resources, USER};
use myfood::demo_data;
use myfood::services::GenerateOutcome;

#[tokio::test]
async fn test_seeding_twice_creates_nothing_new() {
    let resources = test_resources().await;
    let db = &resources.database;

    let first = demo_data::seed(db, None).await.unwrap();
    assert_eq!(first.ingredients_created, 18);
    assert_eq!(first.recipes_created, 3);
    assert_eq!(first.plan_slots, 0);

    let second = demo_data::seed(db, None).await.unwrap();
    assert_eq!(second.ingredients_created, 0);
    assert_eq!(second.recipes_created, 0);
    assert_eq!(second.recipes_updated, 3);

    assert_eq!(db.ingredients().list().await.unwrap().len(), 18);
    let recipes = db.recipes().list().await.unwrap();
    assert_eq!(recipes.len(), 3);
    assert!(recipes.iter().all(|r| !r.lines.is_empty()));
}

#[tokio::test]
async fn test_sample_week_aggregates_onions_across_recipes() {
    let resources = test_resources().await;
    let summary = demo_data::seed(&resources.database, Some(USER)).await.unwrap();
    assert_eq!(summary.plan_slots, 4);

    let GenerateOutcome::Draft(draft) = resources.planner().generate(USER).await.unwrap() else {
        panic!("expected a draft for the sample week");
    };

    // Pasta 0.1 kg at 4/4 and 2/4, chicken rice 0.1 kg at 2/4, stew 0.2 kg at 6/6
    let onions = draft
        .items
        .iter()
        .find(|item| item.name == "Onions")
        .unwrap();
    assert_eq!(onions.unit, "kg");
    assert_eq!(onions.recipe_details.len(), 4);
    assert_quantity(onions.quantity, 0.4);

    let pasta = draft.items.iter().find(|item| item.name == "Pasta").unwrap();
    assert_quantity(pasta.quantity, 600.0);
}
