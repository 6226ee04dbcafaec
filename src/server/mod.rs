//! HTTP API for the food diary.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check
//! - `GET /api/food-diary/{date}`: Entries, totals and meal groups for a day
//! - `POST /api/food-diary`: Add an entry
//! - `PUT /api/food-diary/{id}`: Update an entry
//! - `DELETE /api/food-diary/{id}`: Delete an entry
//! - `GET /api/food-diary/nutrition-summary?startDate=&endDate=`: Per-day totals
//!
//! Requests act on behalf of the user named in the `X-User-Id` header, or the
//! configured default user when the header is absent. The header identifies,
//! it does not authenticate.

mod error;
mod food_diary;

pub use error::ApiError;

use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use fooddiary_core::{DiaryService, FoodEntryStore, UserId};

pub const USER_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub diary: DiaryService<dyn FoodEntryStore>,
    pub default_user: UserId,
}

impl AppState {
    pub fn new(store: Arc<dyn FoodEntryStore>, default_user: UserId) -> Self {
        Self {
            diary: DiaryService::new(store),
            default_user,
        }
    }
}

/// The user a request acts for, added to request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

/// Resolve the acting user from `X-User-Id`
async fn user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match request.headers().get(&USER_HEADER) {
        Some(value) => match value.to_str().ok().map(UserId::new) {
            Some(Ok(user)) => user,
            _ => {
                return ApiError::BadRequest("X-User-Id header must be a non-empty string".into())
                    .into_response()
            }
        },
        None => state.default_user.clone(),
    };

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health));

    // Day reads and entry updates share a path shape, so one route serves both
    let diary_routes = Router::new()
        .route("/api/food-diary", post(food_diary::add_entry))
        .route(
            "/api/food-diary/nutrition-summary",
            get(food_diary::nutrition_summary),
        )
        .route(
            "/api/food-diary/{key}",
            get(food_diary::get_day)
                .put(food_diary::update_entry)
                .delete(food_diary::delete_entry),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            user_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(diary_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
