use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{DiaryError, Result};
use crate::models::{
    DailyNutrition, DateRange, EntryId, FoodEntry, FoodEntryPatch, MealGroups, NewFoodEntry,
    UserId, YearMonth,
};
use crate::nutrition::{aggregate, group_by_meal, summarize_range, RangeSummary};
use crate::store::FoodEntryStore;

/// Read model for the daily log: the day's entries, their totals and the
/// same entries grouped by meal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub date: NaiveDate,
    pub entries: Vec<FoodEntry>,
    pub nutrition: DailyNutrition,
    pub meals: MealGroups,
}

impl DayLog {
    pub fn from_entries(date: NaiveDate, entries: Vec<FoodEntry>) -> Self {
        let nutrition = aggregate(&entries, date).summary();
        let meals = group_by_meal(&entries);
        Self {
            date,
            entries,
            nutrition,
            meals,
        }
    }
}

/// Stateless orchestration over a [`FoodEntryStore`].
///
/// Every call re-derives its result from the store; nothing is cached.
pub struct DiaryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for DiaryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: FoodEntryStore + ?Sized> DiaryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Entries, totals and meal groups for one date
    pub async fn day(&self, user: &UserId, date: NaiveDate) -> Result<DayLog> {
        let entries = self.store.list_entries_for_date(user, date).await?;
        tracing::debug!(%user, %date, entries = entries.len(), "loaded day");
        Ok(DayLog::from_entries(date, entries))
    }

    /// One summary per day from `start` to `end` inclusive
    pub async fn summarize_range(
        &self,
        user: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeSummary> {
        let range = DateRange::new(start, end)?;
        let entries = self.store.list_entries_in_range(user, range).await?;
        tracing::debug!(%user, %range, entries = entries.len(), "summarizing range");
        summarize_range(&entries, start, end)
    }

    /// Summaries for every day of `month`
    pub async fn month(&self, user: &UserId, month: YearMonth) -> Result<RangeSummary> {
        let range = month.range();
        self.summarize_range(user, range.start(), range.end()).await
    }

    pub async fn add_entry(&self, user: &UserId, entry: NewFoodEntry) -> Result<FoodEntry> {
        let created = self.store.add_entry(user, entry).await?;
        tracing::info!(%user, id = %created.id, date = %created.date, "added food entry");
        Ok(created)
    }

    pub async fn update_entry(
        &self,
        user: &UserId,
        id: EntryId,
        patch: FoodEntryPatch,
    ) -> Result<FoodEntry> {
        let updated = self.store.update_entry(user, id, patch).await?;
        tracing::info!(%user, %id, date = %updated.date, "updated food entry");
        Ok(updated)
    }

    /// Delete an entry and return the date it was logged on
    pub async fn delete_entry(&self, user: &UserId, id: EntryId) -> Result<NaiveDate> {
        let entry = self
            .store
            .get_entry(user, id)
            .await?
            .ok_or(DiaryError::NotFound(id))?;
        self.store.delete_entry(user, id).await?;
        tracing::info!(%user, %id, date = %entry.date, "deleted food entry");
        Ok(entry.date)
    }
}
