// ABOUTME: Route handlers for the weekly meal plan and shopping list generation
// ABOUTME: Slot upsert, delete and reset, plus aggregation of the plan into a reviewable draft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Weekly plan routes
//!
//! Generation never fails because of an empty plan: the caller receives
//! `"status": "empty"` and an informational message instead.

use crate::{
    database::UpsertSlotRequest,
    errors::AppError,
    logging::AppLogger,
    middleware::require_user,
    models::{DayOfWeek, MealType, PendingItem, Recipe, WeeklyPlanSlot},
    resources::ServerResources,
    services::GenerateOutcome,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Response for the planning board
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanningResponse {
    /// The user's slots, Monday lunch first
    pub plans: Vec<WeeklyPlanSlot>,
    /// Recipes available for planning
    pub recipes: Vec<Recipe>,
    /// Days in display order
    pub days: Vec<DayOfWeek>,
    /// Meal types in display order
    pub meal_types: Vec<MealType>,
}

/// Response for a plan reset
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Number of slots removed
    pub deleted: u64,
}

/// Response for shopping list generation
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateResponse {
    /// Nothing is planned
    Empty {
        /// Informational message for the user
        message: String,
    },
    /// Items are waiting for review
    Draft {
        /// Handle for `GET /api/shopping-lists/drafts/:draft_id`
        draft_id: Uuid,
        /// Last instant the draft can be taken
        expires_at: DateTime<Utc>,
        /// Aggregated items
        items: Vec<PendingItem>,
    },
}

/// Planning routes implementation
pub struct PlanningRoutes;

impl PlanningRoutes {
    /// Create all planning routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/planning",
                get(Self::handle_index).post(Self::handle_upsert),
            )
            .route("/api/planning/reset", post(Self::handle_reset))
            .route(
                "/api/planning/generate-shopping-list",
                post(Self::handle_generate),
            )
            .route("/api/planning/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/planning
    async fn handle_index(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let plans = resources.database.weekly_plans().list_for_user(user_id).await?;
        let recipes = resources.database.recipes().list().await?;
        let response = PlanningResponse {
            plans,
            recipes,
            days: DayOfWeek::ALL.to_vec(),
            meal_types: vec![MealType::Lunch, MealType::Dinner],
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/planning
    async fn handle_upsert(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UpsertSlotRequest>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let slot = resources
            .database
            .weekly_plans()
            .upsert(user_id, &body)
            .await?;
        let key = format!("{}/{}", slot.day_of_week, slot.meal_type);
        AppLogger::log_plan_event(user_id, "upsert", Some(&key));
        Ok((StatusCode::OK, Json(slot)).into_response())
    }

    /// Handle DELETE /api/planning/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        if !resources.database.weekly_plans().delete(user_id, id).await? {
            return Err(AppError::not_found(format!("Weekly plan slot {id}")));
        }
        AppLogger::log_plan_event(user_id, "delete", None);
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/planning/reset
    async fn handle_reset(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let deleted = resources.database.weekly_plans().reset(user_id).await?;
        AppLogger::log_plan_event(user_id, "reset", None);
        Ok((StatusCode::OK, Json(ResetResponse { deleted })).into_response())
    }

    /// Handle POST /api/planning/generate-shopping-list
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = require_user(&headers)?;
        let response = match resources.planner().generate(user_id).await? {
            GenerateOutcome::NoPlannedMeals => (
                StatusCode::OK,
                Json(GenerateResponse::Empty {
                    message: "No planned meals found".to_owned(),
                }),
            ),
            GenerateOutcome::Draft(draft) => (
                StatusCode::CREATED,
                Json(GenerateResponse::Draft {
                    draft_id: draft.id,
                    expires_at: draft.expires_at,
                    items: draft.items,
                }),
            ),
        };
        Ok(response.into_response())
    }
}
