// ABOUTME: Route handlers for the recipe REST API
// ABOUTME: Recipes are returned with their ordered ingredient lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Recipe routes

use crate::{
    database::RecipeRequest, errors::AppError, middleware::require_user, models::Recipe,
    resources::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for listing recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeListResponse {
    /// Recipes ordered by name, each with its lines
    pub recipes: Vec<Recipe>,
    /// Number of recipes returned
    pub total: usize,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let recipes = resources.database.recipes().list().await?;
        let response = RecipeListResponse {
            total: recipes.len(),
            recipes,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecipeRequest>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let recipe = resources.database.recipes().create(&body).await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let recipe = resources
            .database
            .recipes()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle PUT /api/recipes/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<RecipeRequest>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        let recipe = resources
            .database
            .recipes()
            .update(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle DELETE /api/recipes/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        require_user(&headers)?;
        if !resources.database.recipes().delete(id).await? {
            return Err(AppError::not_found(format!("Recipe {id}")));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
