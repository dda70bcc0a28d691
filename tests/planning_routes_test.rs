// ABOUTME: HTTP tests for the weekly plan routes and shopping list generation
// ABOUTME: Covers slot upserts, reset, the empty-plan message and draft contents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{
    assert_quantity, ingredient, plan, recipe, test_app, test_resources, OTHER_USER, USER,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_planning_board_lists_days_meals_and_recipes() {
    let resources = test_resources().await;
    let salt = ingredient(&resources.database, "Salt", "g").await;
    let soup = recipe(&resources.database, "Soup", 2, &[(salt.id, 1.0, None)]).await;
    plan(&resources.database, USER, "friday", "lunch", soup.id, 2).await;

    let board: Value = AxumTestRequest::get("/api/planning")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(board["plans"].as_array().unwrap().len(), 1);
    assert_eq!(board["plans"][0]["day_of_week"], "friday");
    assert_eq!(board["plans"][0]["recipe_name"], "Soup");
    assert_eq!(board["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(board["days"].as_array().unwrap().len(), 7);
    assert_eq!(board["days"][0], "monday");
    assert_eq!(board["meal_types"], json!(["lunch", "dinner"]));
}

#[tokio::test]
async fn test_upsert_delete_and_reset_slots() {
    let resources = test_resources().await;
    let salt = ingredient(&resources.database, "Salt", "g").await;
    let soup = recipe(&resources.database, "Soup", 2, &[(salt.id, 1.0, None)]).await;

    let slot: Value = AxumTestRequest::post("/api/planning")
        .user(USER)
        .json(&json!({
            "day_of_week": "tue",
            "meal_type": "dinner",
            "recipe_id": soup.id,
            "servings": 3
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(slot["day_of_week"], "tuesday");
    assert_eq!(slot["servings"], 3);
    let slot_id = slot["id"].as_i64().unwrap();

    AxumTestRequest::delete(&format!("/api/planning/{slot_id}"))
        .user(OTHER_USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::delete(&format!("/api/planning/{slot_id}"))
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    plan(&resources.database, USER, "monday", "lunch", soup.id, 2).await;
    plan(&resources.database, USER, "monday", "dinner", soup.id, 2).await;
    let reset: Value = AxumTestRequest::post("/api/planning/reset")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(reset["deleted"], 2);
}

#[tokio::test]
async fn test_upsert_rejects_unknown_recipe() {
    let resources = test_resources().await;

    let body: Value = AxumTestRequest::post("/api/planning")
        .user(USER)
        .json(&json!({
            "day_of_week": "monday",
            "meal_type": "lunch",
            "recipe_id": 77,
            "servings": 2
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(body["error"]["details"]["fields"]["recipe_id"].is_string());
}

#[tokio::test]
async fn test_generate_with_empty_plan_is_informational() {
    let resources = test_resources().await;

    let body: Value = AxumTestRequest::post("/api/planning/generate-shopping-list")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "empty");
    assert_eq!(body["message"], "No planned meals found");
    assert!(resources.drafts.is_empty());
}

#[tokio::test]
async fn test_generate_merges_and_scales_across_slots() {
    let resources = test_resources().await;
    let db = &resources.database;
    let tomato = ingredient(db, "Tomato", "g").await;
    let salt = ingredient(db, "Salt", "g").await;
    let pasta = recipe(
        db,
        "Pasta",
        4,
        &[(tomato.id, 500.0, Some("g")), (salt.id, 5.0, None)],
    )
    .await;
    let stew = recipe(
        db,
        "Stew",
        6,
        &[(tomato.id, 300.0, Some("g")), (salt.id, 1.0, Some("tsp"))],
    )
    .await;
    plan(db, USER, "monday", "dinner", pasta.id, 2).await;
    plan(db, USER, "tuesday", "dinner", stew.id, 6).await;

    let body: Value = AxumTestRequest::post("/api/planning/generate-shopping-list")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["status"], "draft");
    assert!(body["draft_id"].is_string());
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);

    let tomatoes = &items[0];
    assert_eq!(tomatoes["name"], "Tomato");
    assert_eq!(tomatoes["unit"], "g");
    assert_eq!(tomatoes["is_manual"], false);
    assert_quantity(tomatoes["quantity"].as_f64().unwrap(), 550.0);
    let details = tomatoes["recipe_details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["recipe_name"], "Pasta");
    assert_quantity(details[0]["quantity"].as_f64().unwrap(), 250.0);
    assert_quantity(details[0]["original_quantity"].as_f64().unwrap(), 500.0);

    let units: Vec<&str> = items[1..]
        .iter()
        .map(|item| item["unit"].as_str().unwrap())
        .collect();
    assert_eq!(units, vec!["g", "tsp"]);
}

#[tokio::test]
async fn test_generate_only_reads_the_callers_plan() {
    let resources = test_resources().await;
    let db = &resources.database;
    let rice = ingredient(db, "Rice", "g").await;
    let bowl = recipe(db, "Bowl", 1, &[(rice.id, 100.0, None)]).await;
    plan(db, OTHER_USER, "monday", "lunch", bowl.id, 3).await;

    let body: Value = AxumTestRequest::post("/api/planning/generate-shopping-list")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "empty");
}
