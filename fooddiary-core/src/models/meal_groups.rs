use serde::{Deserialize, Serialize};

use super::food_entry::FoodEntry;
use super::meal_type::MealType;

/// A day's entries partitioned by meal. Every meal type is always present,
/// possibly empty, and each group keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealGroups {
    pub breakfast: Vec<FoodEntry>,
    pub lunch: Vec<FoodEntry>,
    pub dinner: Vec<FoodEntry>,
    pub snack: Vec<FoodEntry>,
}

impl MealGroups {
    pub fn get(&self, meal_type: MealType) -> &[FoodEntry] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
        }
    }

    pub(crate) fn get_mut(&mut self, meal_type: MealType) -> &mut Vec<FoodEntry> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }

    /// Groups in display order
    pub fn iter(&self) -> impl Iterator<Item = (MealType, &[FoodEntry])> + '_ {
        MealType::ALL
            .into_iter()
            .map(move |meal_type| (meal_type, self.get(meal_type)))
    }

    /// Total number of entries across all groups
    pub fn len(&self) -> usize {
        self.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
