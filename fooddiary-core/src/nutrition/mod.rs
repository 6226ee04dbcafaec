//! Pure nutrition transformers: daily totals, meal grouping and range
//! summaries. None of these touch a store.

mod aggregate;
mod meals;
mod range;

pub use aggregate::aggregate;
pub use meals::group_by_meal;
pub use range::{summarize_range, RangeSummary};
