// ABOUTME: Database operations for recipes and their ordered ingredient lines
// ABOUTME: Create and update run in one transaction that replaces every line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::{parse_timestamp, placeholders};
use crate::constants::limits::NAME_MAX_LEN;
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::models::{round_quantity, Difficulty, Recipe, RecipeLine};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// One ingredient line of a recipe request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLineRequest {
    /// Catalog ingredient
    #[serde(default, alias = "id")]
    pub ingredient_id: Option<i64>,
    /// Quantity for the recipe's base servings
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unit; blank means the ingredient default
    #[serde(default)]
    pub unit: Option<String>,
}

/// Request to create or replace a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Preparation steps
    #[serde(default)]
    pub instructions: String,
    /// Preparation minutes
    #[serde(default)]
    pub prep_time: Option<i64>,
    /// Cooking minutes
    #[serde(default)]
    pub cook_time: Option<i64>,
    /// Base servings
    #[serde(default)]
    pub servings: i64,
    /// `easy`, `medium` or `hard`
    #[serde(default)]
    pub difficulty: String,
    /// Ingredient lines in display order
    #[serde(default, alias = "lines")]
    pub ingredients: Vec<RecipeLineRequest>,
}

impl RecipeRequest {
    /// Check every field that can be checked without storage
    ///
    /// Returns the collector so ingredient existence can be added before
    /// reporting.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        errors.check(name.is_empty(), "name", "The name field is required.");
        errors.check(
            name.chars().count() > NAME_MAX_LEN,
            "name",
            "The name may not be greater than 255 characters.",
        );
        errors.check(
            self.instructions.trim().is_empty(),
            "instructions",
            "The instructions field is required.",
        );
        errors.check(
            self.prep_time.is_some_and(|t| t < 0 || u32::try_from(t).is_err()),
            "prep_time",
            "The prep time must be at least 0.",
        );
        errors.check(
            self.cook_time.is_some_and(|t| t < 0 || u32::try_from(t).is_err()),
            "cook_time",
            "The cook time must be at least 0.",
        );
        errors.check(
            self.servings < 1 || u32::try_from(self.servings).is_err(),
            "servings",
            "The servings must be at least 1.",
        );
        errors.check(
            Difficulty::parse(&self.difficulty).is_none(),
            "difficulty",
            "The selected difficulty is invalid.",
        );
        errors.check(
            self.ingredients.is_empty(),
            "ingredients",
            "The ingredients field is required.",
        );
        for (index, line) in self.ingredients.iter().enumerate() {
            errors.check(
                line.ingredient_id.is_none(),
                &format!("ingredients.{index}.ingredient_id"),
                "The ingredient field is required.",
            );
            let field = format!("ingredients.{index}.quantity");
            match line.quantity {
                None => errors.add(field, "The quantity field is required."),
                Some(q) if !(q > 0.0 && q.is_finite()) => {
                    errors.add(field, "The quantity must be greater than 0.");
                }
                Some(q) if round_quantity(q) <= 0.0 => {
                    errors.add(field, "The quantity must be at least 0.01.");
                }
                Some(_) => {}
            }
        }
        errors
    }
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All recipes with their lines, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list(&self) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query("SELECT * FROM recipes ORDER BY name COLLATE NOCASE, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;
        let mut recipes = rows
            .iter()
            .map(row_to_recipe)
            .collect::<AppResult<Vec<_>>>()?;
        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        let mut lines = self.load_lines(&ids).await?;
        for recipe in &mut recipes {
            recipe.lines = lines.remove(&recipe.id).unwrap_or_default();
        }
        Ok(recipes)
    }

    /// Get one recipe with its lines
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query("SELECT * FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut recipe = row_to_recipe(&row)?;
        recipe.lines = self.load_lines(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(Some(recipe))
    }

    /// Find a recipe by exact name
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Recipe>> {
        let id: Option<i64> = sqlx::query("SELECT id FROM recipes WHERE name = $1 ORDER BY id LIMIT 1")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find recipe: {e}")))?
            .map(|row| row.get("id"));
        match id {
            Some(id) => self.get(id).await,
            None => Ok(None),
        }
    }

    /// Look up many recipes with their lines, keyed by id
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn find_many(&self, ids: &[i64]) -> AppResult<HashMap<i64, Recipe>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT * FROM recipes WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipes: {e}")))?;

        let mut lines = self.load_lines(ids).await?;
        rows.iter()
            .map(|row| {
                let mut recipe = row_to_recipe(row)?;
                recipe.lines = lines.remove(&recipe.id).unwrap_or_default();
                Ok((recipe.id, recipe))
            })
            .collect()
    }

    /// Whether a recipe exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;
        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    /// Create a recipe and its lines
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error
    pub async fn create(&self, request: &RecipeRequest) -> AppResult<Recipe> {
        self.validate(request).await?;
        let now = Utc::now().to_rfc3339();

        let mut tx = self.begin().await?;
        let result = sqlx::query(
            r"
            INSERT INTO recipes (
                name, description, instructions, prep_time, cook_time,
                servings, difficulty, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(request.name.trim())
        .bind(blank_to_none(request.description.as_deref()))
        .bind(request.instructions.trim())
        .bind(request.prep_time)
        .bind(request.cook_time)
        .bind(request.servings)
        .bind(request.difficulty.as_str())
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;
        let id = result.last_insert_rowid();

        insert_lines(&mut tx, id, &request.ingredients).await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        info!(recipe.id = id, lines = request.ingredients.len(), "Recipe created");
        self.get(id).await?.ok_or_else(|| AppError::not_found("Recipe"))
    }

    /// Replace a recipe's fields and every one of its lines
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error
    pub async fn update(&self, id: i64, request: &RecipeRequest) -> AppResult<Option<Recipe>> {
        if !self.exists(id).await? {
            return Ok(None);
        }
        self.validate(request).await?;

        let mut tx = self.begin().await?;
        sqlx::query(
            r"
            UPDATE recipes SET
                name = $1, description = $2, instructions = $3, prep_time = $4,
                cook_time = $5, servings = $6, difficulty = $7, updated_at = $8
            WHERE id = $9
            ",
        )
        .bind(request.name.trim())
        .bind(blank_to_none(request.description.as_deref()))
        .bind(request.instructions.trim())
        .bind(request.prep_time)
        .bind(request.cook_time)
        .bind(request.servings)
        .bind(request.difficulty.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        sqlx::query("DELETE FROM recipe_ingredient WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to detach recipe lines: {e}")))?;
        insert_lines(&mut tx, id, &request.ingredients).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        info!(recipe.id = id, lines = request.ingredients.len(), "Recipe updated");
        self.get(id).await
    }

    /// Delete a recipe; its lines and the plan slots using it go with it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(recipe.id = id, "Recipe deleted");
        }
        Ok(deleted)
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }

    async fn validate(&self, request: &RecipeRequest) -> AppResult<()> {
        let mut errors = request.field_errors();

        let ids: Vec<i64> = request
            .ingredients
            .iter()
            .filter_map(|l| l.ingredient_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if !ids.is_empty() {
            let sql = format!(
                "SELECT id FROM ingredients WHERE id IN ({})",
                placeholders(ids.len())
            );
            let mut query = sqlx::query(&sql);
            for id in &ids {
                query = query.bind(id);
            }
            let known: HashSet<i64> = query
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check ingredients: {e}")))?
                .iter()
                .map(|row| row.get("id"))
                .collect();
            for (index, line) in request.ingredients.iter().enumerate() {
                let Some(ingredient_id) = line.ingredient_id else {
                    continue;
                };
                errors.check(
                    !known.contains(&ingredient_id),
                    &format!("ingredients.{index}.ingredient_id"),
                    "The selected ingredient is invalid.",
                );
            }
        }

        errors.into_result()
    }

    async fn load_lines(&self, recipe_ids: &[i64]) -> AppResult<HashMap<i64, Vec<RecipeLine>>> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            r"
            SELECT ri.recipe_id, ri.ingredient_id, ri.quantity, ri.unit, i.name AS ingredient_name
            FROM recipe_ingredient ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id IN ({})
            ORDER BY ri.recipe_id, ri.position, ri.id
            ",
            placeholders(recipe_ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in recipe_ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe lines: {e}")))?;

        let mut lines: HashMap<i64, Vec<RecipeLine>> = HashMap::new();
        for row in &rows {
            let recipe_id: i64 = row.get("recipe_id");
            lines.entry(recipe_id).or_default().push(RecipeLine {
                ingredient_id: row.get("ingredient_id"),
                ingredient_name: row.get("ingredient_name"),
                quantity: row.get("quantity"),
                unit: row.get("unit"),
            });
        }
        Ok(lines)
    }
}

async fn insert_lines(
    tx: &mut Transaction<'static, Sqlite>,
    recipe_id: i64,
    lines: &[RecipeLineRequest],
) -> AppResult<()> {
    for (position, line) in lines.iter().enumerate() {
        let position = i64::try_from(position)
            .map_err(|e| AppError::internal(format!("Line position overflow: {e}")))?;
        let (Some(ingredient_id), Some(quantity)) = (line.ingredient_id, line.quantity) else {
            return Err(AppError::internal("Recipe line is missing its ingredient or quantity"));
        };
        sqlx::query(
            r"
            INSERT INTO recipe_ingredient (recipe_id, ingredient_id, position, quantity, unit)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .bind(position)
        .bind(round_quantity(quantity))
        .bind(line.unit.as_deref().map_or("", str::trim))
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to attach recipe line: {e}")))?;
    }
    Ok(())
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn column_u32(row: &SqliteRow, column: &str) -> AppResult<u32> {
    let value: i64 = row.get(column);
    u32::try_from(value).map_err(|e| AppError::internal(format!("Invalid {column}: {e}")))
}

fn optional_u32(row: &SqliteRow, column: &str) -> AppResult<Option<u32>> {
    let value: Option<i64> = row.get(column);
    value
        .map(|v| u32::try_from(v).map_err(|e| AppError::internal(format!("Invalid {column}: {e}"))))
        .transpose()
}

/// Convert a database row to a `Recipe` without lines
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let difficulty: String = row.get("difficulty");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(Recipe {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        instructions: row.get("instructions"),
        prep_time: optional_u32(row, "prep_time")?,
        cook_time: optional_u32(row, "cook_time")?,
        base_servings: column_u32(row, "servings")?,
        difficulty: Difficulty::parse(&difficulty).unwrap_or_default(),
        lines: Vec::new(),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RecipeRequest {
        RecipeRequest {
            name: "Pasta".into(),
            description: None,
            instructions: "Boil.".into(),
            prep_time: Some(5),
            cook_time: Some(10),
            servings: 4,
            difficulty: "easy".into(),
            ingredients: vec![RecipeLineRequest {
                ingredient_id: Some(1),
                quantity: Some(500.0),
                unit: Some("g".into()),
            }],
        }
    }

    #[test]
    fn test_valid_request_has_no_field_errors() {
        assert!(valid_request().field_errors().is_empty());
    }

    #[test]
    fn test_field_errors_cover_servings_difficulty_and_lines() {
        let mut request = valid_request();
        request.servings = 0;
        request.difficulty = "extreme".into();
        request.ingredients[0].quantity = Some(0.0);
        let errors = request.field_errors();
        assert!(errors.get("servings").is_some());
        assert!(errors.get("difficulty").is_some());
        assert!(errors.get("ingredients.0.quantity").is_some());
    }

    #[test]
    fn test_line_quantity_that_rounds_to_zero_is_rejected() {
        let mut request = valid_request();
        request.ingredients[0].quantity = Some(0.004);
        assert!(request.field_errors().get("ingredients.0.quantity").is_some());

        request.ingredients[0].quantity = Some(0.005);
        assert!(request.field_errors().is_empty());
    }

    #[test]
    fn test_line_without_ingredient_or_quantity_is_rejected() {
        let mut request = valid_request();
        request.ingredients[0].ingredient_id = None;
        request.ingredients[0].quantity = None;
        let errors = request.field_errors();
        assert!(errors.get("ingredients.0.ingredient_id").is_some());
        assert!(errors.get("ingredients.0.quantity").is_some());
    }

    #[test]
    fn test_recipe_without_lines_is_rejected() {
        let mut request = valid_request();
        request.ingredients.clear();
        assert!(request.field_errors().get("ingredients").is_some());
    }

    #[test]
    fn test_negative_times_are_rejected() {
        let mut request = valid_request();
        request.prep_time = Some(-1);
        request.cook_time = Some(-3);
        let errors = request.field_errors();
        assert!(errors.get("prep_time").is_some());
        assert!(errors.get("cook_time").is_some());
    }
}
