use chrono::NaiveDate;

use crate::models::{DailyNutrition, FoodEntry};

/// Sum the entries logged on `date` into a [`DailyNutrition`].
///
/// Entries for other dates are ignored. A missing macro counts as zero for
/// that macro only; every entry contributes its calories.
pub fn aggregate<'a, I>(entries: I, date: NaiveDate) -> DailyNutrition
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.date == date)
        .fold(DailyNutrition::empty(date), |mut day, entry| {
            day.total_calories += u64::from(entry.calories);
            day.total_protein += entry.protein.unwrap_or(0.0);
            day.total_carbs += entry.carbs.unwrap_or(0.0);
            day.total_fat += entry.fat.unwrap_or(0.0);
            day.entries.push(entry.clone());
            day
        })
}
