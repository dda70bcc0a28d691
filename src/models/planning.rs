// ABOUTME: Weekly plan model assigning a recipe and serving count to a day and meal slot
// ABOUTME: Defines DayOfWeek and MealType with their storage spelling and ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Monday
    #[serde(alias = "mon")]
    Monday,
    /// Tuesday
    #[serde(alias = "tue")]
    Tuesday,
    /// Wednesday
    #[serde(alias = "wed")]
    Wednesday,
    /// Thursday
    #[serde(alias = "thu")]
    Thursday,
    /// Friday
    #[serde(alias = "fri")]
    Friday,
    /// Saturday
    #[serde(alias = "sat")]
    Saturday,
    /// Sunday
    #[serde(alias = "sun")]
    Sunday,
}

impl DayOfWeek {
    /// All days in week order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(format!("unknown day of week '{other}'")),
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
}

impl MealType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(format!("unknown meal type '{other}'")),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recipe assigned to a (day, meal) slot of a user's week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlanSlot {
    /// Slot identifier
    pub id: i64,
    /// Owner
    pub user_id: UserId,
    /// Day of the slot
    pub day_of_week: DayOfWeek,
    /// Meal of the slot
    pub meal_type: MealType,
    /// Planned recipe
    pub recipe_id: i64,
    /// Recipe name for display, when the recipe still exists
    pub recipe_name: Option<String>,
    /// Portions to cook (at least 1)
    pub servings: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl WeeklyPlanSlot {
    /// Sort key ordering slots Monday lunch first
    #[must_use]
    pub const fn slot_key(&self) -> (DayOfWeek, MealType) {
        (self.day_of_week, self.meal_type)
    }
}
