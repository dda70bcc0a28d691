// ABOUTME: Database operations for per-user weekly plan slots
// ABOUTME: One slot per (user, day, meal) with insert-or-replace semantics and per-user reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::parse_timestamp;
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::models::{DayOfWeek, MealType, UserId, WeeklyPlanSlot};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

/// Request to assign a recipe to a slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertSlotRequest {
    /// `monday`..`sunday` or `mon`..`sun`
    #[serde(default)]
    pub day_of_week: String,
    /// `lunch` or `dinner`
    #[serde(default)]
    pub meal_type: String,
    /// Recipe to plan
    #[serde(default)]
    pub recipe_id: Option<i64>,
    /// Servings to cook
    #[serde(default)]
    pub servings: Option<i64>,
}

/// Request fields after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    /// Day of the slot
    pub day_of_week: DayOfWeek,
    /// Meal of the slot
    pub meal_type: MealType,
    /// Planned recipe
    pub recipe_id: i64,
    /// Planned servings
    pub servings: u32,
}

impl UpsertSlotRequest {
    /// Parse and range-check every field
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` with per-field messages
    pub fn parse(&self) -> AppResult<SlotAssignment> {
        let mut errors = FieldErrors::new();
        let day = self.day_of_week.parse::<DayOfWeek>();
        let meal = self.meal_type.parse::<MealType>();
        let servings = self
            .servings
            .filter(|s| *s >= 1)
            .and_then(|s| u32::try_from(s).ok());

        if let Err(message) = &day {
            errors.add("day_of_week", message.clone());
        }
        if let Err(message) = &meal {
            errors.add("meal_type", message.clone());
        }
        errors.check(
            self.recipe_id.is_none(),
            "recipe_id",
            "The recipe id field is required.",
        );
        errors.check(
            servings.is_none(),
            "servings",
            "The servings must be at least 1.",
        );

        match (day, meal, self.recipe_id, servings) {
            (Ok(day_of_week), Ok(meal_type), Some(recipe_id), Some(servings)) => {
                Ok(SlotAssignment {
                    day_of_week,
                    meal_type,
                    recipe_id,
                    servings,
                })
            }
            _ => Err(errors
                .into_result()
                .err()
                .unwrap_or_else(|| AppError::invalid_input("Invalid slot"))),
        }
    }
}

/// Weekly plan database operations manager
pub struct WeeklyPlansManager {
    pool: SqlitePool,
}

impl WeeklyPlansManager {
    /// Create a new weekly plans manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A user's slots ordered Monday to Sunday, lunch before dinner
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<WeeklyPlanSlot>> {
        let rows = sqlx::query(
            r"
            SELECT wp.*, r.name AS recipe_name
            FROM weekly_plans wp
            LEFT JOIN recipes r ON r.id = wp.recipe_id
            WHERE wp.user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list weekly plan: {e}")))?;

        let mut slots = rows.iter().map(row_to_slot).collect::<AppResult<Vec<_>>>()?;
        slots.sort_by_key(WeeklyPlanSlot::slot_key);
        Ok(slots)
    }

    /// Assign a recipe to a slot, replacing whatever was planned there
    ///
    /// # Errors
    ///
    /// Returns a validation error (including an unknown recipe) or a database error
    pub async fn upsert(&self, user_id: UserId, request: &UpsertSlotRequest) -> AppResult<WeeklyPlanSlot> {
        let assignment = request.parse()?;

        let recipe_known = sqlx::query("SELECT COUNT(*) AS count FROM recipes WHERE id = $1")
            .bind(assignment.recipe_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?
            .get::<i64, _>("count")
            > 0;
        if !recipe_known {
            let mut errors = FieldErrors::new();
            errors.add("recipe_id", "The selected recipe id is invalid.");
            errors.into_result()?;
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO weekly_plans (user_id, day_of_week, meal_type, recipe_id, servings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (user_id, day_of_week, meal_type) DO UPDATE SET
                recipe_id = excluded.recipe_id,
                servings = excluded.servings,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id)
        .bind(assignment.day_of_week.as_str())
        .bind(assignment.meal_type.as_str())
        .bind(assignment.recipe_id)
        .bind(i64::from(assignment.servings))
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save weekly plan slot: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT wp.*, r.name AS recipe_name
            FROM weekly_plans wp
            LEFT JOIN recipes r ON r.id = wp.recipe_id
            WHERE wp.user_id = $1 AND wp.day_of_week = $2 AND wp.meal_type = $3
            ",
        )
        .bind(user_id)
        .bind(assignment.day_of_week.as_str())
        .bind(assignment.meal_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to reload weekly plan slot: {e}")))?;

        info!(
            user.id = user_id,
            day = %assignment.day_of_week,
            meal = %assignment.meal_type,
            recipe.id = assignment.recipe_id,
            "Weekly plan slot saved"
        );
        row_to_slot(&row)
    }

    /// Delete one of the user's slots
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete(&self, user_id: UserId, slot_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM weekly_plans WHERE id = $1 AND user_id = $2")
            .bind(slot_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete weekly plan slot: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every slot of the user, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn reset(&self, user_id: UserId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM weekly_plans WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to reset weekly plan: {e}")))?;
        Ok(result.rows_affected())
    }
}

/// Convert a database row to a `WeeklyPlanSlot`
fn row_to_slot(row: &SqliteRow) -> AppResult<WeeklyPlanSlot> {
    let day: String = row.get("day_of_week");
    let meal: String = row.get("meal_type");
    let servings: i64 = row.get("servings");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(WeeklyPlanSlot {
        id: row.get("id"),
        user_id: row.get("user_id"),
        day_of_week: day.parse().map_err(AppError::internal)?,
        meal_type: meal.parse().map_err(AppError::internal)?,
        recipe_id: row.get("recipe_id"),
        recipe_name: row.get("recipe_name"),
        servings: u32::try_from(servings)
            .map_err(|e| AppError::internal(format!("Invalid servings: {e}")))?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(day: &str, meal: &str, servings: Option<i64>) -> UpsertSlotRequest {
        UpsertSlotRequest {
            day_of_week: day.into(),
            meal_type: meal.into(),
            recipe_id: Some(1),
            servings,
        }
    }

    #[test]
    fn test_parse_accepts_short_day_names() {
        let assignment = request("tue", "lunch", Some(2)).parse().unwrap();
        assert_eq!(assignment.day_of_week, DayOfWeek::Tuesday);
        assert_eq!(assignment.meal_type, MealType::Lunch);
        assert_eq!(assignment.servings, 2);
    }

    #[test]
    fn test_breakfast_is_not_a_meal_type() {
        let error = request("monday", "breakfast", Some(1)).parse().unwrap_err();
        assert!(error.details["fields"]["meal_type"].is_string());
    }

    #[test]
    fn test_servings_must_be_positive() {
        let error = request("monday", "dinner", Some(0)).parse().unwrap_err();
        assert!(error.details["fields"]["servings"].is_string());
        let error = request("monday", "dinner", None).parse().unwrap_err();
        assert!(error.details["fields"]["servings"].is_string());
    }
}
