//! Food Diary Core Library
//!
//! Food entry models, the pure nutrition transformers (daily totals, meal
//! grouping, range summaries), the store contract and the diary
//! service/controller shared by the Food Diary applications.

pub mod diary;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod store;

pub use diary::{
    Applied, DayLog, DayRequest, DiaryController, DiaryService, MonthRequest, MonthView,
};
pub use error::{BoxError, DiaryError, Result, ValidationError};
pub use models::{
    DailyNutrition, DateRange, EntryId, FoodEntry, FoodEntryPatch, MealGroups, MealType,
    NewFoodEntry, UserId, YearMonth,
};
pub use nutrition::{aggregate, group_by_meal, summarize_range, RangeSummary};
pub use store::{FoodEntryStore, MemoryFoodEntryStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
