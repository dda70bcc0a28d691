// ABOUTME: Database operations for shopping lists and their items
// ABOUTME: Enforces owner scoping, the open/completed lifecycle and item check toggling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::{parse_timestamp, placeholders};
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::models::{round_quantity, RecipeDetail, ShoppingList, ShoppingListItem, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// One item of a create or add-item request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShoppingListItemRequest {
    /// Catalog ingredient, if any
    #[serde(default)]
    pub ingredient_id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Quantity, at least 0
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unit
    #[serde(default)]
    pub unit: String,
    /// Typed by the user rather than aggregated
    #[serde(default)]
    pub is_manual: Option<bool>,
    /// Provenance carried over from a draft
    #[serde(default)]
    pub recipe_details: Option<Vec<RecipeDetail>>,
}

impl ShoppingListItemRequest {
    fn check(&self, errors: &mut FieldErrors, prefix: &str) {
        errors.check(
            self.name.trim().is_empty(),
            &format!("{prefix}name"),
            "The name field is required.",
        );
        match self.quantity {
            None => errors.add(format!("{prefix}quantity"), "The quantity field is required."),
            Some(q) if !q.is_finite() || q < 0.0 => {
                errors.add(format!("{prefix}quantity"), "The quantity must be at least 0.");
            }
            Some(_) => {}
        }
        errors.check(
            self.unit.trim().is_empty(),
            &format!("{prefix}unit"),
            "The unit field is required.",
        );
    }
}

/// Request to create a shopping list from reviewed items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateShoppingListRequest {
    /// List name; blank uses the configured default
    #[serde(default)]
    pub name: Option<String>,
    /// Items in display order
    #[serde(default)]
    pub items: Vec<ShoppingListItemRequest>,
}

/// Shopping list database operations manager
pub struct ShoppingListsManager {
    pool: SqlitePool,
}

impl ShoppingListsManager {
    /// Create a new shopping lists manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The user's lists with items, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<ShoppingList>> {
        let rows = sqlx::query(
            "SELECT * FROM shopping_lists WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list shopping lists: {e}")))?;

        let mut lists = rows.iter().map(row_to_list).collect::<AppResult<Vec<_>>>()?;
        let ids: Vec<i64> = lists.iter().map(|l| l.id).collect();
        let mut items = self.load_items(&ids).await?;
        for list in &mut lists {
            list.items = items.remove(&list.id).unwrap_or_default();
        }
        Ok(lists)
    }

    /// One of the user's lists with its items
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get(&self, user_id: UserId, list_id: i64) -> AppResult<Option<ShoppingList>> {
        let row = sqlx::query("SELECT * FROM shopping_lists WHERE id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get shopping list: {e}")))?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut list = row_to_list(&row)?;
        list.items = self
            .load_items(&[list_id])
            .await?
            .remove(&list_id)
            .unwrap_or_default();
        Ok(Some(list))
    }

    /// Persist a list and its items in one transaction
    ///
    /// # Errors
    ///
    /// Returns a validation error or a database error
    pub async fn create(
        &self,
        user_id: UserId,
        request: &CreateShoppingListRequest,
        default_name: &str,
    ) -> AppResult<ShoppingList> {
        let mut errors = FieldErrors::new();
        for (index, item) in request.items.iter().enumerate() {
            item.check(&mut errors, &format!("items.{index}."));
        }
        let ingredient_ids: Vec<i64> = request.items.iter().filter_map(|i| i.ingredient_id).collect();
        let known = self.known_ingredients(&ingredient_ids).await?;
        for (index, item) in request.items.iter().enumerate() {
            if let Some(id) = item.ingredient_id {
                errors.check(
                    !known.contains(&id),
                    &format!("items.{index}.ingredient_id"),
                    "The selected ingredient id is invalid.",
                );
            }
        }
        errors.into_result()?;

        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(default_name);
        let now = Utc::now().to_rfc3339();

        let mut tx = self.begin().await?;
        let result = sqlx::query(
            r"
            INSERT INTO shopping_lists (user_id, name, is_completed, created_at, updated_at)
            VALUES ($1, $2, 0, $3, $3)
            ",
        )
        .bind(user_id)
        .bind(name)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create shopping list: {e}")))?;
        let list_id = result.last_insert_rowid();

        for (position, item) in request.items.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|e| AppError::internal(format!("Item position overflow: {e}")))?;
            insert_item(&mut tx, list_id, position, item, false, &now).await?;
        }
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit shopping list: {e}")))?;

        info!(
            user.id = user_id,
            shopping_list.id = list_id,
            items = request.items.len(),
            "Shopping list created"
        );
        self.get(user_id, list_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shopping list"))
    }

    /// Append an item to an open list
    ///
    /// # Errors
    ///
    /// Returns not found for another user's or a missing list, `RESOURCE_LOCKED`
    /// for a completed list, a validation error or a database error
    pub async fn add_item(
        &self,
        user_id: UserId,
        list_id: i64,
        request: &ShoppingListItemRequest,
    ) -> AppResult<ShoppingListItem> {
        let mut errors = FieldErrors::new();
        request.check(&mut errors, "");
        if let Some(id) = request.ingredient_id {
            let known = self.known_ingredients(&[id]).await?;
            errors.check(
                !known.contains(&id),
                "ingredient_id",
                "The selected ingredient id is invalid.",
            );
        }

        let now = Utc::now().to_rfc3339();
        let mut tx = self.begin().await?;
        if !claim_open_list(&mut tx, user_id, list_id, &now).await? {
            let exists = sqlx::query("SELECT 1 FROM shopping_lists WHERE id = $1 AND user_id = $2")
                .bind(list_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to get shopping list: {e}")))?;
            return Err(if exists.is_some() {
                AppError::locked("Items cannot be added to a completed shopping list")
            } else {
                AppError::not_found("Shopping list")
            });
        }
        errors.into_result()?;

        let next: i64 = sqlx::query(
            "SELECT COALESCE(MAX(position) + 1, 0) AS next FROM shopping_list_items WHERE shopping_list_id = $1",
        )
        .bind(list_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to position item: {e}")))?
        .get("next");
        let item_id = insert_item(&mut tx, list_id, next, request, true, &now).await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit item: {e}")))?;

        info!(user.id = user_id, shopping_list.id = list_id, item.id = item_id, "Item added");
        self.get_item(user_id, item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shopping list item"))
    }

    /// Flip an item's checked flag, whatever the list state
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn toggle_item(&self, user_id: UserId, item_id: i64) -> AppResult<Option<ShoppingListItem>> {
        let result = sqlx::query(
            r"
            UPDATE shopping_list_items SET is_checked = 1 - is_checked
            WHERE id = $1 AND shopping_list_id IN (SELECT id FROM shopping_lists WHERE user_id = $2)
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to toggle item: {e}")))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_item(user_id, item_id).await
    }

    /// Delete an item, whatever the list state
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn remove_item(&self, user_id: UserId, item_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM shopping_list_items
            WHERE id = $1 AND shopping_list_id IN (SELECT id FROM shopping_lists WHERE user_id = $2)
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove item: {e}")))?;
        let removed = result.rows_affected() > 0;
        if removed {
            info!(user.id = user_id, item.id = item_id, "Item removed");
        }
        Ok(removed)
    }

    /// Mark a list completed
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn complete(&self, user_id: UserId, list_id: i64) -> AppResult<Option<ShoppingList>> {
        self.set_completed(user_id, list_id, true).await
    }

    /// Set the completion flag directly; `false` reopens the list
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn set_completed(
        &self,
        user_id: UserId,
        list_id: i64,
        completed: bool,
    ) -> AppResult<Option<ShoppingList>> {
        let result = sqlx::query(
            "UPDATE shopping_lists SET is_completed = $1, updated_at = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(completed)
        .bind(Utc::now().to_rfc3339())
        .bind(list_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update shopping list: {e}")))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        info!(user.id = user_id, shopping_list.id = list_id, completed, "Shopping list state changed");
        self.get(user_id, list_id).await
    }

    /// Delete a list and its items
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete(&self, user_id: UserId, list_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shopping_lists WHERE id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete shopping list: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_item(&self, user_id: UserId, item_id: i64) -> AppResult<Option<ShoppingListItem>> {
        let row = sqlx::query(
            r"
            SELECT sli.* FROM shopping_list_items sli
            JOIN shopping_lists sl ON sl.id = sli.shopping_list_id
            WHERE sli.id = $1 AND sl.user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get item: {e}")))?;
        row.as_ref().map(row_to_item).transpose()
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }

    async fn known_ingredients(&self, ids: &[i64]) -> AppResult<HashSet<i64>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let sql = format!(
            "SELECT id FROM ingredients WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check ingredients: {e}")))?;
        Ok(rows.iter().map(|row| row.get("id")).collect())
    }

    async fn load_items(&self, list_ids: &[i64]) -> AppResult<HashMap<i64, Vec<ShoppingListItem>>> {
        if list_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT * FROM shopping_list_items WHERE shopping_list_id IN ({}) ORDER BY shopping_list_id, position, id",
            placeholders(list_ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in list_ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load items: {e}")))?;

        let mut items: HashMap<i64, Vec<ShoppingListItem>> = HashMap::new();
        for row in &rows {
            let item = row_to_item(row)?;
            items.entry(item.shopping_list_id).or_default().push(item);
        }
        Ok(items)
    }
}

async fn insert_item(
    tx: &mut Transaction<'static, Sqlite>,
    list_id: i64,
    position: i64,
    item: &ShoppingListItemRequest,
    manual_by_default: bool,
    now: &str,
) -> AppResult<i64> {
    let is_manual = item.is_manual.unwrap_or(manual_by_default);
    let details = match &item.recipe_details {
        Some(details) if !is_manual && !details.is_empty() => Some(serde_json::to_string(details)?),
        _ => None,
    };
    let result = sqlx::query(
        r"
        INSERT INTO shopping_list_items (
            shopping_list_id, ingredient_id, position, name, quantity, unit,
            is_checked, is_manual, recipe_details, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9)
        ",
    )
    .bind(list_id)
    .bind(item.ingredient_id)
    .bind(position)
    .bind(item.name.trim())
    .bind(round_quantity(item.quantity.unwrap_or_default()))
    .bind(item.unit.trim())
    .bind(is_manual)
    .bind(details)
    .bind(now)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert item: {e}")))?;
    Ok(result.last_insert_rowid())
}

/// Touch an open list owned by the user, taking the write lock
///
/// Returns false when the list is missing, foreign or completed.
async fn claim_open_list(
    tx: &mut Transaction<'static, Sqlite>,
    user_id: UserId,
    list_id: i64,
    now: &str,
) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE shopping_lists SET updated_at = $1 WHERE id = $2 AND user_id = $3 AND is_completed = 0",
    )
    .bind(now)
    .bind(list_id)
    .bind(user_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to touch shopping list: {e}")))?;
    Ok(result.rows_affected() > 0)
}

/// Convert a database row to a `ShoppingList` without items
fn row_to_list(row: &SqliteRow) -> AppResult<ShoppingList> {
    let is_completed: i64 = row.get("is_completed");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(ShoppingList {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        is_completed: is_completed != 0,
        items: Vec::new(),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Convert a database row to a `ShoppingListItem`
fn row_to_item(row: &SqliteRow) -> AppResult<ShoppingListItem> {
    let is_checked: i64 = row.get("is_checked");
    let is_manual: i64 = row.get("is_manual");
    let details_json: Option<String> = row.get("recipe_details");
    let created_at: String = row.get("created_at");
    let recipe_details = details_json
        .map(|json| serde_json::from_str::<Vec<RecipeDetail>>(&json))
        .transpose()?;
    Ok(ShoppingListItem {
        id: row.get("id"),
        shopping_list_id: row.get("shopping_list_id"),
        ingredient_id: row.get("ingredient_id"),
        name: row.get("name"),
        quantity: row.get("quantity"),
        unit: row.get("unit"),
        is_checked: is_checked != 0,
        is_manual: is_manual != 0,
        recipe_details,
        created_at: parse_timestamp(&created_at)?,
    })
}
