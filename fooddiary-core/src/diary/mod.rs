//! Diary orchestration: the stateless service shared by every front end and
//! the per-session controller behind the calendar and daily-log views.

mod controller;
mod service;

pub use controller::{Applied, DayRequest, DiaryController, MonthRequest, MonthView};
pub use service::{DayLog, DiaryService};
