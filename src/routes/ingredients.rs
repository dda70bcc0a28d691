// ABOUTME: Route handlers for the ingredient catalog REST API
// ABOUTME: CRUD endpoints plus the type-ahead search used when composing recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Ingredient catalog routes

use crate::{
    database::IngredientRequest,
    errors::AppError,
    middleware::require_user,
    models::Ingredient,
    resources::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for listing the catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientListResponse {
    /// Ingredients ordered by name
    pub ingredients: Vec<Ingredient>,
    /// Number of ingredients returned
    pub total: usize,
}

/// Query parameters for type-ahead search
#[derive(Debug, Deserialize, Default)]
pub struct SearchIngredientsQuery {
    /// Substring to look for; empty matches everything
    #[serde(default)]
    pub q: String,
    /// Requested cap, never above the configured limit
    pub limit: Option<u32>,
}

/// Response for a deletion
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Confirmation message
    pub message: String,
}

/// Ingredient routes implementation
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/ingredients",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/ingredients/search", get(Self::handle_search))
            .route(
                "/api/ingredients/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/ingredients
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let ingredients = resources.database.ingredients().list().await?;
        let response = IngredientListResponse {
            total: ingredients.len(),
            ingredients,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/ingredients
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<IngredientRequest>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let ingredient = resources.database.ingredients().create(&body).await?;
        Ok((StatusCode::CREATED, Json(ingredient)).into_response())
    }

    /// Handle GET /api/ingredients/search?q=
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchIngredientsQuery>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let cap = resources.config.app_behavior.ingredient_search_limit;
        let limit = query.limit.map_or(cap, |l| l.min(cap));
        let ingredients = resources
            .database
            .ingredients()
            .search(&query.q, limit)
            .await?;
        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /api/ingredients/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let ingredient = resources
            .database
            .ingredients()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {id}")))?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle PUT /api/ingredients/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<IngredientRequest>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let ingredient = resources
            .database
            .ingredients()
            .update(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {id}")))?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle DELETE /api/ingredients/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        if !resources.database.ingredients().delete(id).await? {
            return Err(AppError::not_found(format!("Ingredient {id}")));
        }
        let response = DeletedResponse {
            message: "Ingredient deleted successfully".to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
