//! Diary error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::EntryId;

/// Boxed error raised by a store backend (database, network, ...)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the diary engine and its stores
#[derive(Error, Debug)]
pub enum DiaryError {
    #[error("Invalid food entry: {0}")]
    Validation(#[from] ValidationError),

    #[error("Food entry not found: {0}")]
    NotFound(EntryId),

    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date range: {start} to {end} spans more than {max_days} days")]
    RangeTooLong {
        start: NaiveDate,
        end: NaiveDate,
        max_days: i64,
    },

    #[error("Store error: {0}")]
    Transport(#[source] BoxError),
}

impl DiaryError {
    /// Wrap a backend failure that is opaque to the diary engine
    pub fn transport(err: impl Into<BoxError>) -> Self {
        DiaryError::Transport(err.into())
    }
}

/// Reasons an entry is rejected by add or update
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("food name must not be empty")]
    EmptyFoodName,

    #[error("quantity must be a non-negative number, got {0}")]
    InvalidQuantity(f64),

    #[error("{nutrient} must be a non-negative number, got {value}")]
    InvalidNutrient { nutrient: &'static str, value: f64 },

    #[error("user id must not be empty")]
    EmptyUserId,
}

pub type Result<T, E = DiaryError> = std::result::Result<T, E>;
