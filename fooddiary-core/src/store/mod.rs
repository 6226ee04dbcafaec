//! The food entry store contract and an in-memory implementation.

mod memory;

pub use memory::MemoryFoodEntryStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{DateRange, EntryId, FoodEntry, FoodEntryPatch, NewFoodEntry, UserId};

/// Persistence boundary for food entries.
///
/// Every operation is scoped to `user`; an entry owned by another user is
/// treated as unknown. Listing operations return entries in insertion order
/// (range listings are ordered by date first).
#[async_trait]
pub trait FoodEntryStore: Send + Sync {
    /// Entries logged on `date`, empty when there are none
    async fn list_entries_for_date(&self, user: &UserId, date: NaiveDate)
        -> Result<Vec<FoodEntry>>;

    /// Entries logged on any day of `range`
    async fn list_entries_in_range(&self, user: &UserId, range: DateRange)
        -> Result<Vec<FoodEntry>>;

    async fn get_entry(&self, user: &UserId, id: EntryId) -> Result<Option<FoodEntry>>;

    /// Validate and persist a new entry, assigning id and timestamps
    async fn add_entry(&self, user: &UserId, entry: NewFoodEntry) -> Result<FoodEntry>;

    /// Merge `patch` into an existing entry; `NotFound` for unknown ids
    async fn update_entry(
        &self,
        user: &UserId,
        id: EntryId,
        patch: FoodEntryPatch,
    ) -> Result<FoodEntry>;

    /// Remove an entry; `NotFound` for unknown or already deleted ids
    async fn delete_entry(&self, user: &UserId, id: EntryId) -> Result<()>;
}
