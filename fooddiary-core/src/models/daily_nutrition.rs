use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::food_entry::FoodEntry;

/// Summed calorie and macro totals for one date. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub total_calories: u64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    /// Empty in summary projections
    #[serde(default)]
    pub entries: Vec<FoodEntry>,
}

impl DailyNutrition {
    /// All-zero totals for a day without entries
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_calories: 0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            entries: Vec::new(),
        }
    }

    /// Drop the entry list, keeping only the totals
    pub fn summary(mut self) -> Self {
        self.entries = Vec::new();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.total_calories == 0
            && self.total_protein == 0.0
            && self.total_carbs == 0.0
            && self.total_fat == 0.0
            && self.entries.is_empty()
    }
}

impl fmt::Display for DailyNutrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calories: {} | Protein: {:.0}g | Carbs: {:.0}g | Fat: {:.0}g",
            self.total_calories, self.total_protein, self.total_carbs, self.total_fat
        )
    }
}
