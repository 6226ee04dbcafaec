use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fooddiary_core::{
    DailyNutrition, EntryId, FoodEntry, FoodEntryPatch, MealGroups, NewFoodEntry, RangeSummary,
};

use super::{ApiError, AppState, CurrentUser};

#[derive(Serialize)]
pub struct DayResponse {
    entries: Vec<FoodEntry>,
    nutrition: DailyNutrition,
    meals: MealGroups,
}

#[derive(Deserialize)]
pub struct EntryRequest<T> {
    entry: T,
}

#[derive(Serialize)]
pub struct EntryResponse {
    entry: FoodEntry,
    message: &'static str,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    summary: RangeSummary,
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!("Invalid date '{}'. Use YYYY-MM-DD.", value))
    })
}

fn parse_id(value: &str) -> Result<EntryId, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid entry ID '{}'", value)))
}

fn body<T>(payload: Result<Json<EntryRequest<T>>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(request)| request.entry)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn get_day(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, ApiError> {
    let date = parse_date(&date)?;
    let log = state.diary.day(&user, date).await?;
    Ok(Json(DayResponse {
        entries: log.entries,
        nutrition: log.nutrition,
        meals: log.meals,
    }))
}

pub async fn add_entry(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<EntryRequest<NewFoodEntry>>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryResponse>), ApiError> {
    let input = body(payload)?;
    let entry = state.diary.add_entry(&user, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            entry,
            message: "Food entry added successfully",
        }),
    ))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: Result<Json<EntryRequest<FoodEntryPatch>>, JsonRejection>,
) -> Result<Json<EntryResponse>, ApiError> {
    let id = parse_id(&id)?;
    let patch = body(payload)?;
    let entry = state.diary.update_entry(&user, id, patch).await?;
    Ok(Json(EntryResponse {
        entry,
        message: "Food entry updated successfully",
    }))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.diary.delete_entry(&user, id).await?;
    Ok(Json(MessageResponse {
        message: "Food entry deleted successfully",
    }))
}

pub async fn nutrition_summary(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let summary = state
        .diary
        .summarize_range(&user, query.start_date, query.end_date)
        .await?;
    Ok(Json(SummaryResponse { summary }))
}
