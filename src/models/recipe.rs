// ABOUTME: Recipe model with difficulty, base servings and ordered ingredient lines
// ABOUTME: Lines resolve their effective unit against the ingredient default unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::Ingredient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cooking difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Quick and simple
    #[default]
    Easy,
    /// Some technique required
    Medium,
    /// Demanding
    Hard,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// One (ingredient, quantity, unit) entry of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// Referenced catalog ingredient
    pub ingredient_id: i64,
    /// Ingredient name, denormalized for display
    pub ingredient_name: String,
    /// Quantity for the recipe's base servings
    pub quantity: f64,
    /// Unit as written on the recipe; empty means the ingredient default
    pub unit: String,
}

impl RecipeLine {
    /// Unit used for aggregation: the line unit, or the ingredient default when blank
    #[must_use]
    pub fn effective_unit<'a>(&'a self, ingredient: &'a Ingredient) -> &'a str {
        let unit = self.unit.trim();
        if unit.is_empty() {
            ingredient.default_unit.trim()
        } else {
            unit
        }
    }
}

/// A dish composed of ingredient lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional short description
    pub description: Option<String>,
    /// Preparation steps
    pub instructions: String,
    /// Preparation time in minutes
    pub prep_time: Option<u32>,
    /// Cooking time in minutes
    pub cook_time: Option<u32>,
    /// Number of servings the line quantities are written for (at least 1)
    #[serde(rename = "servings")]
    pub base_servings: u32,
    /// Cooking difficulty
    pub difficulty: Difficulty,
    /// Ordered ingredient lines
    pub lines: Vec<RecipeLine>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(unit: &str) -> Ingredient {
        Ingredient {
            id: 1,
            name: "Salt".into(),
            default_unit: unit.into(),
            category: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(unit: &str) -> RecipeLine {
        RecipeLine {
            ingredient_id: 1,
            ingredient_name: "Salt".into(),
            quantity: 5.0,
            unit: unit.into(),
        }
    }

    #[test]
    fn test_effective_unit_prefers_line_unit() {
        assert_eq!(line("tsp").effective_unit(&ingredient("g")), "tsp");
    }

    #[test]
    fn test_effective_unit_falls_back_to_default() {
        assert_eq!(line("").effective_unit(&ingredient("g")), "g");
        assert_eq!(line("   ").effective_unit(&ingredient("g")), "g");
    }

    #[test]
    fn test_difficulty_round_trip() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::parse(difficulty.as_str()), Some(difficulty));
        }
        assert_eq!(Difficulty::parse("extreme"), None);
    }
}
