use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use super::FoodEntryStore;
use crate::error::{DiaryError, Result};
use crate::models::{DateRange, EntryId, FoodEntry, FoodEntryPatch, NewFoodEntry, UserId};

/// Volatile store keeping entries in insertion order.
///
/// Thread-safe via an internal RwLock; concurrent updates are last-write-wins.
#[derive(Debug, Default)]
pub struct MemoryFoodEntryStore {
    entries: RwLock<Vec<FoodEntry>>,
}

impl MemoryFoodEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all users
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl FoodEntryStore for MemoryFoodEntryStore {
    async fn list_entries_for_date(
        &self,
        user: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<FoodEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| &e.user_id == user && e.date == date)
            .cloned()
            .collect())
    }

    async fn list_entries_in_range(
        &self,
        user: &UserId,
        range: DateRange,
    ) -> Result<Vec<FoodEntry>> {
        let entries = self.entries.read().await;
        let mut found: Vec<FoodEntry> = entries
            .iter()
            .filter(|e| &e.user_id == user && range.contains(e.date))
            .cloned()
            .collect();
        // Stable sort keeps insertion order within a day
        found.sort_by_key(|e| e.date);
        Ok(found)
    }

    async fn get_entry(&self, user: &UserId, id: EntryId) -> Result<Option<FoodEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.id == id && &e.user_id == user)
            .cloned())
    }

    async fn add_entry(&self, user: &UserId, entry: NewFoodEntry) -> Result<FoodEntry> {
        let entry = FoodEntry::create(user, entry, Utc::now())?;
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(
        &self,
        user: &UserId,
        id: EntryId,
        patch: FoodEntryPatch,
    ) -> Result<FoodEntry> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .iter_mut()
            .find(|e| e.id == id && &e.user_id == user)
            .ok_or(DiaryError::NotFound(id))?;
        let updated = slot.patched(patch, Utc::now())?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_entry(&self, user: &UserId, id: EntryId) -> Result<()> {
        let mut entries = self.entries.write().await;
        let index = entries
            .iter()
            .position(|e| e.id == id && &e.user_id == user)
            .ok_or(DiaryError::NotFound(id))?;
        entries.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_add_then_list_for_date() {
        let store = MemoryFoodEntryStore::new();
        let alice = user("alice");
        let d = date(2024, 3, 1);

        let first = store
            .add_entry(&alice, NewFoodEntry::new(d, MealType::Breakfast, "Oatmeal"))
            .await
            .unwrap();
        let second = store
            .add_entry(&alice, NewFoodEntry::new(d, MealType::Lunch, "Salad"))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        let listed = store.list_entries_for_date(&alice, d).await.unwrap();
        let ids: Vec<EntryId> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let other_day = store
            .list_entries_for_date(&alice, date(2024, 3, 2))
            .await
            .unwrap();
        assert!(other_day.is_empty());
    }

    #[tokio::test]
    async fn test_add_invalid_entry_is_not_stored() {
        let store = MemoryFoodEntryStore::new();
        let result = store
            .add_entry(
                &user("alice"),
                NewFoodEntry::new(date(2024, 3, 1), MealType::Snack, ""),
            )
            .await;
        assert!(matches!(result, Err(DiaryError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let store = MemoryFoodEntryStore::new();
        let alice = user("alice");
        let d = date(2024, 3, 1);
        store
            .add_entry(&alice, NewFoodEntry::new(d, MealType::Dinner, "Pasta"))
            .await
            .unwrap();
        let before = store.list_entries_for_date(&alice, d).await.unwrap();

        let missing = EntryId::new();
        let result = store
            .update_entry(&alice, missing, FoodEntryPatch::default())
            .await;
        assert!(matches!(result, Err(DiaryError::NotFound(id)) if id == missing));

        let after = store.list_entries_for_date(&alice, d).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let store = MemoryFoodEntryStore::new();
        let alice = user("alice");
        let created = store
            .add_entry(
                &alice,
                NewFoodEntry::new(date(2024, 3, 1), MealType::Lunch, "Soup").with_calories(200),
            )
            .await
            .unwrap();

        let patch = FoodEntryPatch {
            calories: Some(250),
            ..Default::default()
        };
        let updated = store.update_entry(&alice, created.id, patch).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.calories, 250);

        let fetched = store.get_entry(&alice, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = MemoryFoodEntryStore::new();
        let alice = user("alice");
        let entry = store
            .add_entry(
                &alice,
                NewFoodEntry::new(date(2024, 3, 1), MealType::Snack, "Apple"),
            )
            .await
            .unwrap();

        store.delete_entry(&alice, entry.id).await.unwrap();
        let again = store.delete_entry(&alice, entry.id).await;
        assert!(matches!(again, Err(DiaryError::NotFound(_))));
        assert!(store.get_entry(&alice, entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = MemoryFoodEntryStore::new();
        let alice = user("alice");
        let bob = user("bob");
        let d = date(2024, 3, 1);
        let entry = store
            .add_entry(&alice, NewFoodEntry::new(d, MealType::Dinner, "Curry"))
            .await
            .unwrap();

        assert!(store.list_entries_for_date(&bob, d).await.unwrap().is_empty());
        assert!(matches!(
            store.delete_entry(&bob, entry.id).await,
            Err(DiaryError::NotFound(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_range_listing_sorted_by_date() {
        let store = MemoryFoodEntryStore::new();
        let alice = user("alice");
        for (day, name) in [(3, "Late"), (1, "Early"), (2, "Middle"), (9, "Outside")] {
            store
                .add_entry(
                    &alice,
                    NewFoodEntry::new(date(2024, 3, day), MealType::Lunch, name),
                )
                .await
                .unwrap();
        }

        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 3)).unwrap();
        let names: Vec<String> = store
            .list_entries_in_range(&alice, range)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.food_name)
            .collect();
        assert_eq!(names, vec!["Early", "Middle", "Late"]);
    }
}
