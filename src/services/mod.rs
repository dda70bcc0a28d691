// ABOUTME: Domain service layer for business logic kept out of route handlers
// ABOUTME: Hosts the aggregator, the draft store and the shopping list generation workflow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Domain service layer
//!
//! The aggregator is pure and synchronous; the planner wires it to storage and
//! to the draft store so route handlers stay thin.

/// Weekly plan to shopping list aggregation
pub mod aggregator;

/// Pending shopping-list drafts
pub mod drafts;

/// Shopping list generation workflow
pub mod planner;

pub use aggregator::{aggregate, aggregate_with_report, Aggregation};
pub use drafts::{DraftStore, ShoppingListDraft};
pub use planner::{GenerateOutcome, ShoppingListPlanner};
