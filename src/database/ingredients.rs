// ABOUTME: Database operations for the ingredient catalog
// ABOUTME: Handles CRUD, case-insensitive type-ahead search and bulk lookup by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::{escape_like, is_unique_violation, parse_timestamp, placeholders};
use crate::constants::limits::{CATEGORY_MAX_LEN, NAME_MAX_LEN, UNIT_MAX_LEN};
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::models::Ingredient;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, info};

/// Request to create or replace a catalog ingredient
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientRequest {
    /// Unique display name
    #[serde(default)]
    pub name: String,
    /// Default unit
    #[serde(default)]
    pub unit: String,
    /// Optional grouping
    #[serde(default)]
    pub category: Option<String>,
}

impl IngredientRequest {
    /// Trim every field and turn a blank category into `None`
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            unit: self.unit.trim().to_owned(),
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned),
        }
    }

    /// Check field presence and lengths
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` with per-field messages
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.is_empty(), "name", "The name field is required.");
        errors.check(
            self.name.chars().count() > NAME_MAX_LEN,
            "name",
            "The name may not be greater than 255 characters.",
        );
        errors.check(self.unit.is_empty(), "unit", "The unit field is required.");
        errors.check(
            self.unit.chars().count() > UNIT_MAX_LEN,
            "unit",
            "The unit may not be greater than 50 characters.",
        );
        if let Some(category) = &self.category {
            errors.check(
                category.chars().count() > CATEGORY_MAX_LEN,
                "category",
                "The category may not be greater than 100 characters.",
            );
        }
        errors.into_result()
    }
}

fn name_taken() -> AppError {
    let mut errors = FieldErrors::new();
    errors.add("name", "The name has already been taken.");
    errors
        .into_result()
        .err()
        .unwrap_or_else(|| AppError::already_exists("Ingredient"))
}

/// Ingredient catalog operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All ingredients ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query("SELECT * FROM ingredients ORDER BY name COLLATE NOCASE, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;
        rows.iter().map(row_to_ingredient).collect()
    }

    /// Get one ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT * FROM ingredients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;
        row.as_ref().map(row_to_ingredient).transpose()
    }

    /// Find an ingredient by name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT * FROM ingredients WHERE name = $1 COLLATE NOCASE")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find ingredient: {e}")))?;
        row.as_ref().map(row_to_ingredient).transpose()
    }

    /// Create a catalog ingredient
    ///
    /// # Errors
    ///
    /// Returns a validation error, a `name` field error on a duplicate name, or
    /// a database error
    pub async fn create(&self, request: &IngredientRequest) -> AppResult<Ingredient> {
        let request = request.normalized();
        request.validate()?;
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO ingredients (name, unit, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&request.name)
        .bind(&request.unit)
        .bind(&request.category)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                name_taken()
            } else {
                AppError::database(format!("Failed to create ingredient: {e}"))
            }
        })?;

        let id = result.last_insert_rowid();
        info!(ingredient.id = id, ingredient.name = %request.name, "Ingredient created");

        Ok(Ingredient {
            id,
            name: request.name,
            default_unit: request.unit,
            category: request.category,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace an ingredient's fields
    ///
    /// # Errors
    ///
    /// Returns a validation error, a `name` field error on a duplicate name, or
    /// a database error
    pub async fn update(&self, id: i64, request: &IngredientRequest) -> AppResult<Option<Ingredient>> {
        let request = request.normalized();
        request.validate()?;

        let result = sqlx::query(
            r"
            UPDATE ingredients SET name = $1, unit = $2, category = $3, updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(&request.name)
        .bind(&request.unit)
        .bind(&request.category)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                name_taken()
            } else {
                AppError::database(format!("Failed to update ingredient: {e}"))
            }
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        info!(ingredient.id = id, "Ingredient updated");
        self.get(id).await
    }

    /// Delete an ingredient; recipe lines using it go with it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete ingredient: {e}")))?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(ingredient.id = id, "Ingredient deleted");
        }
        Ok(deleted)
    }

    /// Case-insensitive substring search on name, capped at `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<Ingredient>> {
        let query = query.trim();
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        let rows = sqlx::query(
            r"
            SELECT * FROM ingredients
            WHERE LOWER(name) LIKE $1 ESCAPE '\'
            ORDER BY name COLLATE NOCASE, id
            LIMIT $2
            ",
        )
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search ingredients: {e}")))?;

        debug!(query = %query, results = rows.len(), "Ingredient search");
        rows.iter().map(row_to_ingredient).collect()
    }

    /// Look up many ingredients at once, keyed by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_many(&self, ids: &[i64]) -> AppResult<HashMap<i64, Ingredient>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT * FROM ingredients WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load ingredients: {e}")))?;

        rows.iter()
            .map(|row| row_to_ingredient(row).map(|i| (i.id, i)))
            .collect()
    }

    /// Whether an ingredient exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM ingredients WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check ingredient: {e}")))?;
        let count: i64 = row.get("count");
        Ok(count > 0)
    }
}

/// Convert a database row to an `Ingredient`
fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        default_unit: row.get("unit"),
        category: row.get("category"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_drops_blank_category() {
        let request = IngredientRequest {
            name: "  Tomato ".into(),
            unit: " g".into(),
            category: Some("   ".into()),
        }
        .normalized();
        assert_eq!(request.name, "Tomato");
        assert_eq!(request.unit, "g");
        assert_eq!(request.category, None);
    }

    #[test]
    fn test_validate_reports_each_field() {
        let request = IngredientRequest {
            name: String::new(),
            unit: "u".repeat(51),
            category: Some("c".repeat(101)),
        };
        let error = request.validate().unwrap_err();
        let fields = &error.details["fields"];
        assert!(fields["name"].is_string());
        assert!(fields["unit"].is_string());
        assert!(fields["category"].is_string());
    }
}
