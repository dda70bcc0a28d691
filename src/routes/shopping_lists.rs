// ABOUTME: Route handlers for shopping lists, their items and pending drafts
// ABOUTME: Drafts are taken once and confirmed into a persisted list by the client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Shopping list routes

use crate::{
    database::{CreateShoppingListRequest, ShoppingListItemRequest},
    errors::AppError,
    logging::AppLogger,
    middleware::require_user,
    models::{PendingItem, ShoppingList},
    resources::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Response for listing shopping lists
#[derive(Debug, Serialize, Deserialize)]
pub struct ShoppingListsResponse {
    /// Lists, newest first
    pub shopping_lists: Vec<ShoppingList>,
    /// Number of lists returned
    pub total: usize,
}

/// Response for taking a draft
#[derive(Debug, Serialize, Deserialize)]
pub struct DraftResponse {
    /// Draft handle that was consumed
    pub draft_id: Uuid,
    /// Suggested name for the list to create
    pub default_name: String,
    /// Items to review before confirming
    pub items: Vec<PendingItem>,
}

/// Shopping list routes implementation
pub struct ShoppingListRoutes;

impl ShoppingListRoutes {
    /// Create all shopping list routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/shopping-lists",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/shopping-lists/drafts/:draft_id",
                get(Self::handle_take_draft),
            )
            .route(
                "/api/shopping-lists/items/:item_id",
                delete(Self::handle_remove_item),
            )
            .route(
                "/api/shopping-lists/items/:item_id/toggle",
                patch(Self::handle_toggle_item),
            )
            .route(
                "/api/shopping-lists/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .route("/api/shopping-lists/:id/items", post(Self::handle_add_item))
            .route(
                "/api/shopping-lists/:id/complete",
                patch(Self::handle_complete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/shopping-lists
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let shopping_lists = resources
            .database
            .shopping_lists()
            .list_for_user(user_id)
            .await?;
        let response = ShoppingListsResponse {
            total: shopping_lists.len(),
            shopping_lists,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/shopping-lists/drafts/:draft_id
    async fn handle_take_draft(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(draft_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let draft = resources
            .drafts
            .take(user_id, draft_id)
            .ok_or_else(|| AppError::not_found(format!("Shopping list draft {draft_id}")))?;
        let response = DraftResponse {
            draft_id: draft.id,
            default_name: resources.config.app_behavior.default_shopping_list_name.clone(),
            items: draft.items,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/shopping-lists
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateShoppingListRequest>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let list = resources
            .database
            .shopping_lists()
            .create(
                user_id,
                &body,
                &resources.config.app_behavior.default_shopping_list_name,
            )
            .await?;
        AppLogger::log_shopping_list_event(user_id, list.id, "created");
        Ok((StatusCode::CREATED, Json(list)).into_response())
    }

    /// Handle GET /api/shopping-lists/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let list = resources
            .database
            .shopping_lists()
            .get(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shopping list {id}")))?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle DELETE /api/shopping-lists/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        if !resources.database.shopping_lists().delete(user_id, id).await? {
            return Err(AppError::not_found(format!("Shopping list {id}")));
        }
        AppLogger::log_shopping_list_event(user_id, id, "deleted");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/shopping-lists/:id/items
    async fn handle_add_item(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<ShoppingListItemRequest>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let item = resources
            .database
            .shopping_lists()
            .add_item(user_id, id, &body)
            .await?;
        Ok((StatusCode::CREATED, Json(item)).into_response())
    }

    /// Handle PATCH /api/shopping-lists/:id/complete
    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let list = resources
            .database
            .shopping_lists()
            .complete(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shopping list {id}")))?;
        AppLogger::log_shopping_list_event(user_id, id, "completed");
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle PATCH /api/shopping-lists/items/:item_id/toggle
    async fn handle_toggle_item(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(item_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let item = resources
            .database
            .shopping_lists()
            .toggle_item(user_id, item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shopping list item {item_id}")))?;
        Ok((StatusCode::OK, Json(item)).into_response())
    }

    /// Handle DELETE /api/shopping-lists/items/:item_id
    async fn handle_remove_item(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(item_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        if !resources
            .database
            .shopping_lists()
            .remove_item(user_id, item_id)
            .await?
        {
            return Err(AppError::not_found(format!("Shopping list item {item_id}")));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
