// ABOUTME: HTTP tests for health, ingredient and recipe routes
// ABOUTME: Exercises status codes, response envelopes, validation errors and the user header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{ingredient, test_app, test_resources, USER};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_and_ready() {
    let resources = test_resources().await;

    let health: Value = AxumTestRequest::get("/health")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "myfood-server");

    let ready: Value = AxumTestRequest::get("/ready")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ready["status"], "ready");
}

#[tokio::test]
async fn test_api_requires_user_header() {
    let resources = test_resources().await;

    for uri in ["/api/ingredients", "/api/recipes", "/api/planning", "/api/shopping-lists"] {
        let body: Value = AxumTestRequest::get(uri)
            .send(test_app(&resources))
            .await
            .assert_status(StatusCode::UNAUTHORIZED)
            .json();
        assert_eq!(body["error"]["code"], "AUTH_REQUIRED", "{uri}");
    }

    AxumTestRequest::get("/api/ingredients")
        .header("x-user-id", "abc")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    AxumTestRequest::get("/api/ingredients")
        .header("x-user-id", "0")
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Ingredients
// ============================================================================

#[tokio::test]
async fn test_ingredient_crud() {
    let resources = test_resources().await;

    let created: Value = AxumTestRequest::post("/api/ingredients")
        .user(USER)
        .json(&json!({"name": " Tomato ", "unit": "g", "category": "Vegetables"}))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["name"], "Tomato");
    assert_eq!(created["unit"], "g");
    let id = created["id"].as_i64().unwrap();

    let updated: Value = AxumTestRequest::put(&format!("/api/ingredients/{id}"))
        .user(USER)
        .json(&json!({"name": "Tomato", "unit": "kg"}))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["unit"], "kg");
    assert_eq!(updated["category"], Value::Null);

    let listed: Value = AxumTestRequest::get("/api/ingredients")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["ingredients"][0]["id"], id);

    let deleted: Value = AxumTestRequest::delete(&format!("/api/ingredients/{id}"))
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(deleted["message"], "Ingredient deleted successfully");

    AxumTestRequest::get(&format!("/api/ingredients/{id}"))
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ingredient_validation_errors_are_per_field() {
    let resources = test_resources().await;

    let body: Value = AxumTestRequest::post("/api/ingredients")
        .user(USER)
        .json(&json!({"name": "", "unit": ""}))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(
        body["error"]["details"]["fields"]["name"],
        "The name field is required."
    );
    assert_eq!(
        body["error"]["details"]["fields"]["unit"],
        "The unit field is required."
    );
}

#[tokio::test]
async fn test_ingredient_search_returns_bare_array() {
    let resources = test_resources().await;
    for name in ["Carrot", "Carrot juice", "Potato"] {
        ingredient(&resources.database, name, "g").await;
    }

    let results: Vec<Value> = AxumTestRequest::get("/api/ingredients/search?q=carr")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(results.len(), 2);

    let limited: Vec<Value> = AxumTestRequest::get("/api/ingredients/search?q=&limit=1")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_ingredient_search_never_exceeds_configured_cap() {
    let resources = test_resources().await;
    for index in 0..15 {
        ingredient(&resources.database, &format!("Spice {index:02}"), "g").await;
    }

    let results: Vec<Value> = AxumTestRequest::get("/api/ingredients/search?q=spice&limit=50")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(results.len(), 10);
}

// ============================================================================
// Recipes
// ============================================================================

#[tokio::test]
async fn test_recipe_crud() {
    let resources = test_resources().await;
    let pasta = ingredient(&resources.database, "Pasta", "g").await;
    let tomato = ingredient(&resources.database, "Tomato", "g").await;

    let created: Value = AxumTestRequest::post("/api/recipes")
        .user(USER)
        .json(&json!({
            "name": "Pasta al pomodoro",
            "instructions": "Boil, simmer, toss.",
            "servings": 4,
            "difficulty": "easy",
            "prep_time": 10,
            "cook_time": 20,
            "ingredients": [
                {"ingredient_id": pasta.id, "quantity": 400},
                {"ingredient_id": tomato.id, "quantity": 500, "unit": "g"}
            ]
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["servings"], 4);
    assert_eq!(created["lines"].as_array().unwrap().len(), 2);
    assert_eq!(created["lines"][0]["ingredient_name"], "Pasta");

    let updated: Value = AxumTestRequest::put(&format!("/api/recipes/{id}"))
        .user(USER)
        .json(&json!({
            "name": "Plain pasta",
            "instructions": "Boil.",
            "servings": 2,
            "difficulty": "easy",
            "ingredients": [{"ingredient_id": pasta.id, "quantity": 200}]
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["lines"].as_array().unwrap().len(), 1);

    let listed: Value = AxumTestRequest::get("/api/recipes")
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listed["total"], 1);

    let deleted = AxumTestRequest::delete(&format!("/api/recipes/{id}"))
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(deleted.is_empty());

    AxumTestRequest::get(&format!("/api/recipes/{id}"))
        .user(USER)
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_line_errors_name_the_line() {
    let resources = test_resources().await;
    let pasta = ingredient(&resources.database, "Pasta", "g").await;

    let body: Value = AxumTestRequest::post("/api/recipes")
        .user(USER)
        .json(&json!({
            "name": "Broken",
            "instructions": "None.",
            "servings": 2,
            "difficulty": "medium",
            "ingredients": [
                {"ingredient_id": pasta.id, "quantity": 0},
                {"ingredient_id": 9999, "quantity": 1}
            ]
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    let fields = &body["error"]["details"]["fields"];
    assert!(fields["ingredients.0.quantity"].is_string());
    assert!(fields["ingredients.1.ingredient_id"].is_string());
}

#[tokio::test]
async fn test_recipe_line_quantity_rounding_to_zero_is_rejected() {
    let resources = test_resources().await;
    let saffron = ingredient(&resources.database, "Saffron", "g").await;

    let body: Value = AxumTestRequest::post("/api/recipes")
        .user(USER)
        .json(&json!({
            "name": "Paella",
            "instructions": "Simmer.",
            "servings": 4,
            "difficulty": "medium",
            "ingredients": [{"ingredient_id": saffron.id, "quantity": 0.004, "unit": "g"}]
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(body["error"]["details"]["fields"]["ingredients.0.quantity"].is_string());
}

#[tokio::test]
async fn test_recipe_line_missing_fields_are_field_errors() {
    let resources = test_resources().await;
    let pasta = ingredient(&resources.database, "Pasta", "g").await;

    let body: Value = AxumTestRequest::post("/api/recipes")
        .user(USER)
        .json(&json!({
            "name": "Half written",
            "instructions": "Boil.",
            "servings": 2,
            "difficulty": "easy",
            "ingredients": [
                {"ingredient_id": pasta.id, "unit": "g"},
                {"quantity": 100, "unit": "g"}
            ]
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    let fields = &body["error"]["details"]["fields"];
    assert!(fields["ingredients.0.quantity"].is_string());
    assert!(fields.get("ingredients.0.ingredient_id").is_none());
    assert!(fields["ingredients.1.ingredient_id"].is_string());
    assert!(fields.get("ingredients.1.quantity").is_none());
}

#[tokio::test]
async fn test_update_missing_recipe_is_not_found() {
    let resources = test_resources().await;
    let pasta = ingredient(&resources.database, "Pasta", "g").await;

    AxumTestRequest::put("/api/recipes/404")
        .user(USER)
        .json(&json!({
            "name": "Ghost",
            "instructions": "None.",
            "servings": 1,
            "difficulty": "hard",
            "ingredients": [{"ingredient_id": pasta.id, "quantity": 1}]
        }))
        .send(test_app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
