mod calendar;
mod daily_nutrition;
mod food_entry;
mod ids;
mod meal_groups;
mod meal_type;

pub use calendar::{DateRange, YearMonth};
pub use daily_nutrition::DailyNutrition;
pub use food_entry::{FoodEntry, FoodEntryPatch, NewFoodEntry, DEFAULT_UNIT};
pub use ids::{EntryId, UserId};
pub use meal_groups::MealGroups;
pub use meal_type::MealType;
