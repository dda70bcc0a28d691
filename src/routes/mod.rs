// ABOUTME: Route module organization for the MyFood HTTP API
// ABOUTME: Merges every domain router behind request tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Route module for the MyFood API
//!
//! Each domain module holds only route definitions and thin handlers that
//! delegate to the database managers and the service layer.

/// Health check and readiness routes
pub mod health;
/// Ingredient catalog routes
pub mod ingredients;
/// Weekly plan and shopping list generation routes
pub mod planning;
/// Recipe routes
pub mod recipes;
/// Shopping list, item and draft routes
pub mod shopping_lists;

pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use planning::PlanningRoutes;
pub use recipes::RecipeRoutes;
pub use shopping_lists::ShoppingListRoutes;

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(IngredientRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(PlanningRoutes::routes(Arc::clone(&resources)))
        .merge(ShoppingListRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
