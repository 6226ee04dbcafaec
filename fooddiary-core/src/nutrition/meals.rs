use crate::models::{FoodEntry, MealGroups};

/// Partition entries by meal type, keeping their relative order
pub fn group_by_meal<'a, I>(entries: I) -> MealGroups
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    let mut groups = MealGroups::default();
    for entry in entries {
        groups.get_mut(entry.meal_type).push(entry.clone());
    }
    groups
}
