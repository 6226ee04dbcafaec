use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{EntryId, UserId};
use super::meal_type::MealType;
use crate::error::ValidationError;

pub const DEFAULT_UNIT: &str = "serving";

/// One logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding an entry. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodEntry {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl NewFoodEntry {
    pub fn new(date: NaiveDate, meal_type: MealType, food_name: impl Into<String>) -> Self {
        Self {
            date,
            meal_type,
            food_name: food_name.into(),
            quantity: default_quantity(),
            unit: default_unit(),
            calories: 0,
            protein: None,
            carbs: None,
            fat: None,
            notes: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = quantity;
        self.unit = unit.into();
        self
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = calories;
        self
    }

    pub fn with_protein(mut self, grams: f64) -> Self {
        self.protein = Some(grams);
        self
    }

    pub fn with_carbs(mut self, grams: f64) -> Self {
        self.carbs = Some(grams);
        self
    }

    pub fn with_fat(mut self, grams: f64) -> Self {
        self.fat = Some(grams);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update of an entry. `None` leaves a field unchanged; for the
/// optional fields `Some(None)` clears the value.
///
/// The date is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntryPatch {
    #[serde(default)]
    pub meal_type: Option<MealType>,
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub protein: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub carbs: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub fat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// Present-but-null becomes `Some(None)`; absence is handled by `default`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FoodEntryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FoodEntry {
    /// Build a stored entry from user input, validating every field
    pub fn create(
        user_id: &UserId,
        input: NewFoodEntry,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            id: EntryId::new(),
            user_id: user_id.clone(),
            date: input.date,
            meal_type: input.meal_type,
            food_name: input.food_name.trim().to_string(),
            quantity: input.quantity,
            unit: input.unit.trim().to_string(),
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fat: input.fat,
            notes: normalize_notes(input.notes),
            created_at: now,
            updated_at: now,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Return a copy with `patch` merged in and `updated_at` refreshed.
    /// `self` is left untouched when validation fails.
    pub fn patched(
        &self,
        patch: FoodEntryPatch,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut entry = self.clone();
        if let Some(meal_type) = patch.meal_type {
            entry.meal_type = meal_type;
        }
        if let Some(food_name) = patch.food_name {
            entry.food_name = food_name.trim().to_string();
        }
        if let Some(quantity) = patch.quantity {
            entry.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            entry.unit = unit.trim().to_string();
        }
        if let Some(calories) = patch.calories {
            entry.calories = calories;
        }
        if let Some(protein) = patch.protein {
            entry.protein = protein;
        }
        if let Some(carbs) = patch.carbs {
            entry.carbs = carbs;
        }
        if let Some(fat) = patch.fat {
            entry.fat = fat;
        }
        if let Some(notes) = patch.notes {
            entry.notes = normalize_notes(notes);
        }
        entry.validate()?;
        entry.updated_at = now.max(entry.created_at);
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.food_name.trim().is_empty() {
            return Err(ValidationError::EmptyFoodName);
        }
        if !is_non_negative(self.quantity) {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        for (nutrient, value) in [
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if let Some(value) = value {
                if !is_non_negative(value) {
                    return Err(ValidationError::InvalidNutrient { nutrient, value });
                }
            }
        }
        Ok(())
    }

    /// "P: 12g C: 65g F: 8g", only when all three macros are recorded
    pub fn macros_line(&self) -> Option<String> {
        match (self.protein, self.carbs, self.fat) {
            (Some(p), Some(c), Some(f)) => Some(format!("P: {}g C: {}g F: {}g", p, c, f)),
            _ => None,
        }
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

impl fmt::Display for FoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}, {} kcal",
            self.food_name, self.quantity, self.unit, self.calories
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user1").unwrap()
    }

    fn march_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_new_food_entry_defaults() {
        let input = NewFoodEntry::new(march_first(), MealType::Breakfast, "Oatmeal");
        assert_eq!(input.quantity, 1.0);
        assert_eq!(input.unit, "serving");
        assert_eq!(input.calories, 0);
        assert!(input.protein.is_none());
    }

    #[test]
    fn test_create_assigns_identity_and_timestamps() {
        let now = Utc::now();
        let input = NewFoodEntry::new(march_first(), MealType::Breakfast, "  Oatmeal  ")
            .with_quantity(1.0, "bowl")
            .with_calories(350)
            .with_protein(12.0)
            .with_notes("   ");

        let entry = FoodEntry::create(&user(), input, now).unwrap();
        assert_eq!(entry.food_name, "Oatmeal");
        assert_eq!(entry.user_id, user());
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.updated_at, now);
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let input = NewFoodEntry::new(march_first(), MealType::Lunch, "   ");
        assert_eq!(
            FoodEntry::create(&user(), input, Utc::now()),
            Err(ValidationError::EmptyFoodName)
        );
    }

    #[test]
    fn test_create_rejects_negative_quantity() {
        let input =
            NewFoodEntry::new(march_first(), MealType::Lunch, "Soup").with_quantity(-1.0, "cup");
        assert_eq!(
            FoodEntry::create(&user(), input, Utc::now()),
            Err(ValidationError::InvalidQuantity(-1.0))
        );
    }

    #[test]
    fn test_create_rejects_bad_macros() {
        let input = NewFoodEntry::new(march_first(), MealType::Lunch, "Soup").with_fat(-2.5);
        assert!(matches!(
            FoodEntry::create(&user(), input, Utc::now()),
            Err(ValidationError::InvalidNutrient { nutrient: "fat", .. })
        ));

        let input = NewFoodEntry::new(march_first(), MealType::Lunch, "Soup").with_carbs(f64::NAN);
        assert!(FoodEntry::create(&user(), input, Utc::now()).is_err());
    }

    #[test]
    fn test_patch_preserves_identity() {
        let created = Utc::now();
        let entry = FoodEntry::create(
            &user(),
            NewFoodEntry::new(march_first(), MealType::Lunch, "Salad")
                .with_calories(420)
                .with_protein(35.0),
            created,
        )
        .unwrap();

        let later = created + chrono::Duration::minutes(5);
        let patch = FoodEntryPatch {
            calories: Some(450),
            protein: Some(None),
            notes: Some(Some("extra dressing".into())),
            ..Default::default()
        };
        let updated = entry.patched(patch, later).unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.date, entry.date);
        assert_eq!(updated.calories, 450);
        assert!(updated.protein.is_none());
        assert_eq!(updated.notes.as_deref(), Some("extra dressing"));
    }

    #[test]
    fn test_patch_validation_failure_leaves_entry_untouched() {
        let entry = FoodEntry::create(
            &user(),
            NewFoodEntry::new(march_first(), MealType::Dinner, "Pasta"),
            Utc::now(),
        )
        .unwrap();
        let patch = FoodEntryPatch {
            food_name: Some("".into()),
            ..Default::default()
        };
        assert_eq!(
            entry.patched(patch, Utc::now()),
            Err(ValidationError::EmptyFoodName)
        );
        assert_eq!(entry.food_name, "Pasta");
    }

    #[test]
    fn test_patch_json_distinguishes_null_from_absent() {
        let patch: FoodEntryPatch =
            serde_json::from_str(r#"{"calories": 200, "protein": null}"#).unwrap();
        assert_eq!(patch.calories, Some(200));
        assert_eq!(patch.protein, Some(None));
        assert_eq!(patch.carbs, None);
        assert!(!patch.is_empty());
        assert!(FoodEntryPatch::default().is_empty());
    }

    #[test]
    fn test_new_entry_json_uses_form_defaults() {
        let input: NewFoodEntry = serde_json::from_str(
            r#"{"date": "2024-03-01", "mealType": "snack", "foodName": "Apple"}"#,
        )
        .unwrap();
        assert_eq!(input.meal_type, MealType::Snack);
        assert_eq!(input.quantity, 1.0);
        assert_eq!(input.unit, "serving");
    }

    #[test]
    fn test_negative_calories_rejected_by_json() {
        let result = serde_json::from_str::<NewFoodEntry>(
            r#"{"date": "2024-03-01", "mealType": "snack", "foodName": "Apple", "calories": -5}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_macros_line_requires_all_three() {
        let mut entry = FoodEntry::create(
            &user(),
            NewFoodEntry::new(march_first(), MealType::Breakfast, "Oatmeal")
                .with_protein(12.0)
                .with_carbs(65.0),
            Utc::now(),
        )
        .unwrap();
        assert!(entry.macros_line().is_none());

        entry.fat = Some(8.0);
        assert_eq!(entry.macros_line().unwrap(), "P: 12g C: 65g F: 8g");
    }

    #[test]
    fn test_display() {
        let entry = FoodEntry::create(
            &user(),
            NewFoodEntry::new(march_first(), MealType::Breakfast, "Oatmeal")
                .with_quantity(1.0, "bowl")
                .with_calories(350),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(entry.to_string(), "Oatmeal: 1 bowl, 350 kcal");
    }

    #[test]
    fn test_entry_json_is_camel_case() {
        let entry = FoodEntry::create(
            &user(),
            NewFoodEntry::new(march_first(), MealType::Breakfast, "Oatmeal"),
            Utc::now(),
        )
        .unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["foodName"], "Oatmeal");
        assert_eq!(json["mealType"], "breakfast");
        assert_eq!(json["date"], "2024-03-01");
        assert!(json.get("protein").is_none());
    }
}
