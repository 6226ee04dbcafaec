use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use fooddiary_core::{
    DateRange, DiaryError, EntryId, FoodEntry, FoodEntryPatch, FoodEntryStore, MealType,
    NewFoodEntry, Result, UserId,
};

/// `FoodEntryStore` backed by the `food_entries` table
pub struct SqliteFoodEntryStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct FoodEntryRow {
    id: String,
    user_id: String,
    date: String,
    meal_type: String,
    food_name: String,
    quantity: f64,
    unit: String,
    calories: i64,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, date, meal_type, food_name, quantity, unit, \
     calories, protein, carbs, fat, notes, created_at, updated_at FROM food_entries";

impl SqliteFoodEntryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert(&self, entry: &FoodEntry) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO food_entries (id, user_id, date, meal_type, food_name, quantity, unit, calories, protein, carbs, fat, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.as_str())
        .bind(entry.date.to_string())
        .bind(entry.meal_type.as_str())
        .bind(&entry.food_name)
        .bind(entry.quantity)
        .bind(&entry.unit)
        .bind(i64::from(entry.calories))
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fat)
        .bind(&entry.notes)
        .bind(entry.created_at.to_rfc3339())
        .bind(entry.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl FoodEntryStore for SqliteFoodEntryStore {
    async fn list_entries_for_date(
        &self,
        user: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<FoodEntry>> {
        let rows: Vec<FoodEntryRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND date = ? ORDER BY rowid"
        ))
        .bind(user.as_str())
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(DiaryError::transport)?;

        rows.into_iter().map(FoodEntry::try_from).collect()
    }

    async fn list_entries_in_range(
        &self,
        user: &UserId,
        range: DateRange,
    ) -> Result<Vec<FoodEntry>> {
        // ISO dates compare correctly as text
        let rows: Vec<FoodEntryRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date, rowid"
        ))
        .bind(user.as_str())
        .bind(range.start().to_string())
        .bind(range.end().to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(DiaryError::transport)?;

        rows.into_iter().map(FoodEntry::try_from).collect()
    }

    async fn get_entry(&self, user: &UserId, id: EntryId) -> Result<Option<FoodEntry>> {
        let row: Option<FoodEntryRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ? AND user_id = ?"))
                .bind(id.to_string())
                .bind(user.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(DiaryError::transport)?;

        row.map(FoodEntry::try_from).transpose()
    }

    async fn add_entry(&self, user: &UserId, entry: NewFoodEntry) -> Result<FoodEntry> {
        let entry = FoodEntry::create(user, entry, Utc::now())?;
        self.insert(&entry).await.map_err(DiaryError::transport)?;
        tracing::debug!(%user, id = %entry.id, "inserted food entry");
        Ok(entry)
    }

    async fn update_entry(
        &self,
        user: &UserId,
        id: EntryId,
        patch: FoodEntryPatch,
    ) -> Result<FoodEntry> {
        let current = self
            .get_entry(user, id)
            .await?
            .ok_or(DiaryError::NotFound(id))?;
        let updated = current.patched(patch, Utc::now())?;

        let result = sqlx::query(
            r#"
            UPDATE food_entries
            SET meal_type = ?, food_name = ?, quantity = ?, unit = ?, calories = ?,
                protein = ?, carbs = ?, fat = ?, notes = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(updated.meal_type.as_str())
        .bind(&updated.food_name)
        .bind(updated.quantity)
        .bind(&updated.unit)
        .bind(i64::from(updated.calories))
        .bind(updated.protein)
        .bind(updated.carbs)
        .bind(updated.fat)
        .bind(&updated.notes)
        .bind(updated.updated_at.to_rfc3339())
        .bind(id.to_string())
        .bind(user.as_str())
        .execute(&self.pool)
        .await
        .map_err(DiaryError::transport)?;

        // Deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(DiaryError::NotFound(id));
        }
        Ok(updated)
    }

    async fn delete_entry(&self, user: &UserId, id: EntryId) -> Result<()> {
        let result = sqlx::query("DELETE FROM food_entries WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user.as_str())
            .execute(&self.pool)
            .await
            .map_err(DiaryError::transport)?;

        if result.rows_affected() == 0 {
            return Err(DiaryError::NotFound(id));
        }
        Ok(())
    }
}

impl TryFrom<FoodEntryRow> for FoodEntry {
    type Error = DiaryError;

    fn try_from(row: FoodEntryRow) -> Result<Self> {
        let corrupt = |field: &str, value: &str| {
            DiaryError::transport(format!(
                "corrupt {} '{}' in food entry {}",
                field, value, row.id
            ))
        };

        Ok(FoodEntry {
            id: row.id.parse().map_err(|_| corrupt("id", &row.id))?,
            user_id: UserId::new(row.user_id.as_str())
                .map_err(|_| corrupt("user_id", &row.user_id))?,
            date: row.date.parse().map_err(|_| corrupt("date", &row.date))?,
            meal_type: row
                .meal_type
                .parse::<MealType>()
                .map_err(|_| corrupt("meal_type", &row.meal_type))?,
            food_name: row.food_name.clone(),
            quantity: row.quantity,
            unit: row.unit.clone(),
            calories: u32::try_from(row.calories)
                .map_err(|_| corrupt("calories", &row.calories.to_string()))?,
            protein: row.protein,
            carbs: row.carbs,
            fat: row.fat,
            notes: row.notes.clone(),
            created_at: parse_timestamp(&row.created_at)
                .ok_or_else(|| corrupt("created_at", &row.created_at))?,
            updated_at: parse_timestamp(&row.updated_at)
                .ok_or_else(|| corrupt("updated_at", &row.updated_at))?,
        })
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
