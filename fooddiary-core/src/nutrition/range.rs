use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use super::aggregate::aggregate;
use crate::error::Result;
use crate::models::{DailyNutrition, DateRange, FoodEntry};

/// One summary per calendar day, keyed and ordered by date
pub type RangeSummary = BTreeMap<NaiveDate, DailyNutrition>;

/// Summarize every day from `start` to `end` inclusive.
///
/// Days without entries are present with zero totals. Summaries carry no
/// entry list. Fails with `InvalidRange` when `end < start` and with
/// `RangeTooLong` when the span exceeds [`DateRange::MAX_DAYS`].
pub fn summarize_range(
    entries: &[FoodEntry],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RangeSummary> {
    let range = DateRange::new(start, end)?;

    let mut by_day: HashMap<NaiveDate, Vec<&FoodEntry>> = HashMap::new();
    for entry in entries.iter().filter(|e| range.contains(e.date)) {
        by_day.entry(entry.date).or_default().push(entry);
    }

    Ok(range
        .days()
        .map(|day| {
            let nutrition = match by_day.get(&day) {
                Some(day_entries) => aggregate(day_entries.iter().copied(), day).summary(),
                None => DailyNutrition::empty(day),
            };
            (day, nutrition)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiaryError;
    use crate::models::MealType;
    use crate::nutrition::fixtures::{date, entry};

    #[test]
    fn test_single_day() {
        let d = date(2024, 3, 1);
        let summary = summarize_range(&[], d, d).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[&d], DailyNutrition::empty(d));
    }

    #[test]
    fn test_reversed_range_fails() {
        let result = summarize_range(&[], date(2024, 3, 3), date(2024, 3, 1));
        assert!(matches!(result, Err(DiaryError::InvalidRange { .. })));
    }

    #[test]
    fn test_oversized_range_fails_before_allocating() {
        let result = summarize_range(&[], date(1, 1, 1), date(9999, 12, 31));
        assert!(matches!(result, Err(DiaryError::RangeTooLong { .. })));

        let year = summarize_range(&[], date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert_eq!(year.len(), 366);
    }

    #[test]
    fn test_sparse_days_are_zero() {
        let entries = vec![
            entry(date(2024, 3, 1), MealType::Breakfast, "Oatmeal", 350, Some(12.0)),
            entry(date(2024, 3, 1), MealType::Lunch, "Salad", 420, Some(35.0)),
        ];

        let summary = summarize_range(&entries, date(2024, 3, 1), date(2024, 3, 3)).unwrap();
        let days: Vec<NaiveDate> = summary.keys().copied().collect();
        assert_eq!(
            days,
            vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]
        );

        let first = &summary[&date(2024, 3, 1)];
        assert_eq!(first.total_calories, 770);
        assert_eq!(first.total_protein, 47.0);
        assert!(first.entries.is_empty());

        assert!(summary[&date(2024, 3, 2)].is_empty());
        assert!(summary[&date(2024, 3, 3)].is_empty());
    }

    #[test]
    fn test_length_matches_day_count_across_months() {
        let start = date(2024, 1, 15);
        let end = date(2024, 3, 10);
        let summary = summarize_range(&[], start, end).unwrap();
        assert_eq!(summary.len() as i64, (end - start).num_days() + 1);
    }

    #[test]
    fn test_days_do_not_carry_over() {
        let entries = vec![
            entry(date(2024, 3, 1), MealType::Dinner, "Pasta", 600, None),
            entry(date(2024, 3, 2), MealType::Dinner, "Rice", 500, None),
        ];

        let summary = summarize_range(&entries, date(2024, 3, 1), date(2024, 3, 2)).unwrap();
        assert_eq!(summary[&date(2024, 3, 1)].total_calories, 600);
        assert_eq!(summary[&date(2024, 3, 2)].total_calories, 500);
    }

    #[test]
    fn test_entries_outside_range_ignored() {
        let entries = vec![entry(date(2024, 2, 29), MealType::Snack, "Chips", 300, None)];
        let summary = summarize_range(&entries, date(2024, 3, 1), date(2024, 3, 2)).unwrap();
        assert!(summary.values().all(DailyNutrition::is_empty));
        assert!(!summary.contains_key(&date(2024, 2, 29)));
    }
}
