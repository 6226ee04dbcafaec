use chrono::NaiveDate;

use super::service::{DayLog, DiaryService};
use crate::error::Result;
use crate::models::{EntryId, FoodEntry, FoodEntryPatch, NewFoodEntry, UserId, YearMonth};
use crate::nutrition::RangeSummary;
use crate::store::FoodEntryStore;

/// Ticket for a pending daily-log fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRequest {
    seq: u64,
    date: NaiveDate,
}

impl DayRequest {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Ticket for a pending calendar-month fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRequest {
    seq: u64,
    month: YearMonth,
}

impl MonthRequest {
    pub fn month(&self) -> YearMonth {
        self.month
    }
}

/// Outcome of handing a fetch result back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result was installed as the current view
    Current,
    /// A newer request superseded this one; the result was dropped
    Stale,
}

/// Calendar read model: one summary per day of the displayed month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub month: YearMonth,
    pub days: RangeSummary,
}

/// Per-session diary state: the selected date, the displayed month and the
/// last successfully derived view of each.
///
/// Operations are awaited one at a time. A failed fetch or mutation leaves the
/// previous views untouched and is reported through the returned error and
/// [`DiaryController::last_error`].
pub struct DiaryController<S: ?Sized> {
    service: DiaryService<S>,
    user: UserId,
    selected_date: NaiveDate,
    displayed_month: YearMonth,
    day: Option<DayLog>,
    month: Option<MonthView>,
    latest_day: Option<DayRequest>,
    latest_month: Option<MonthRequest>,
    next_seq: u64,
    last_error: Option<String>,
}

impl<S: FoodEntryStore + ?Sized> DiaryController<S> {
    pub fn new(service: DiaryService<S>, user: UserId, today: NaiveDate) -> Self {
        Self {
            service,
            user,
            selected_date: today,
            displayed_month: YearMonth::of(today),
            day: None,
            month: None,
            latest_day: None,
            latest_month: None,
            next_seq: 0,
            last_error: None,
        }
    }

    pub fn service(&self) -> &DiaryService<S> {
        &self.service
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn displayed_month(&self) -> YearMonth {
        self.displayed_month
    }

    pub fn day_view(&self) -> Option<&DayLog> {
        self.day.as_ref()
    }

    pub fn month_view(&self) -> Option<&MonthView> {
        self.month.as_ref()
    }

    /// Message of the most recent failure, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Select `date` and derive its daily log. The calendar follows when the
    /// date lies outside the displayed month.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        let request = self.request_day(date);
        let result = self.service.day(&self.user, date).await;
        self.apply_day(request, result)?;

        let month = YearMonth::of(date);
        if month != self.displayed_month {
            self.show_month(month).await?;
        }
        Ok(())
    }

    /// Display `month` and derive its calendar summaries
    pub async fn show_month(&mut self, month: YearMonth) -> Result<()> {
        let request = self.request_month(month);
        let result = self.service.month(&self.user, month).await;
        self.apply_month(request, result).map(|_| ())
    }

    pub async fn next_month(&mut self) -> Result<()> {
        self.show_month(self.displayed_month.next()).await
    }

    pub async fn previous_month(&mut self) -> Result<()> {
        self.show_month(self.displayed_month.previous()).await
    }

    /// Re-derive both views from the store. Both fetches run; the first
    /// failure is returned and kept in `last_error`.
    pub async fn refresh(&mut self) -> Result<()> {
        let day = self.refresh_day().await;
        let month = self.refresh_month().await;
        if let Err(e) = &day {
            self.last_error = Some(e.to_string());
        }
        day.and(month)
    }

    pub async fn add_entry(&mut self, entry: NewFoodEntry) -> Result<FoodEntry> {
        let result = self.service.add_entry(&self.user, entry).await;
        let created = self.record(result)?;
        self.after_change(created.date).await;
        Ok(created)
    }

    pub async fn update_entry(
        &mut self,
        id: EntryId,
        patch: FoodEntryPatch,
    ) -> Result<FoodEntry> {
        let result = self.service.update_entry(&self.user, id, patch).await;
        let updated = self.record(result)?;
        self.after_change(updated.date).await;
        Ok(updated)
    }

    pub async fn delete_entry(&mut self, id: EntryId) -> Result<()> {
        let result = self.service.delete_entry(&self.user, id).await;
        let date = self.record(result)?;
        self.after_change(date).await;
        Ok(())
    }

    /// Mark `date` as the latest requested daily log. Results of earlier
    /// requests are dropped by [`DiaryController::apply_day`].
    pub fn request_day(&mut self, date: NaiveDate) -> DayRequest {
        let request = DayRequest {
            seq: self.bump(),
            date,
        };
        self.selected_date = date;
        self.latest_day = Some(request);
        request
    }

    /// Install a daily-log result if `request` is still the latest one
    pub fn apply_day(&mut self, request: DayRequest, result: Result<DayLog>) -> Result<Applied> {
        if self.latest_day != Some(request) {
            tracing::debug!(date = %request.date, "dropping stale day result");
            return Ok(Applied::Stale);
        }
        let log = self.record(result)?;
        self.day = Some(log);
        Ok(Applied::Current)
    }

    /// Mark `month` as the latest requested calendar month
    pub fn request_month(&mut self, month: YearMonth) -> MonthRequest {
        let request = MonthRequest {
            seq: self.bump(),
            month,
        };
        self.displayed_month = month;
        self.latest_month = Some(request);
        request
    }

    /// Install a month summary if `request` is still the latest one
    pub fn apply_month(
        &mut self,
        request: MonthRequest,
        result: Result<RangeSummary>,
    ) -> Result<Applied> {
        if self.latest_month != Some(request) {
            tracing::debug!(month = %request.month, "dropping stale month result");
            return Ok(Applied::Stale);
        }
        let days = self.record(result)?;
        self.month = Some(MonthView {
            month: request.month,
            days,
        });
        Ok(Applied::Current)
    }

    async fn refresh_day(&mut self) -> Result<()> {
        let date = self.selected_date;
        let request = self.request_day(date);
        let result = self.service.day(&self.user, date).await;
        self.apply_day(request, result).map(|_| ())
    }

    async fn refresh_month(&mut self) -> Result<()> {
        self.show_month(self.displayed_month).await
    }

    /// A mutation succeeded: refresh every view showing `date`. Refresh
    /// failures are kept in `last_error` and do not undo the mutation.
    async fn after_change(&mut self, date: NaiveDate) {
        if date == self.selected_date {
            let _ = self.refresh_day().await;
        }
        if self.displayed_month.contains(date) {
            let _ = self.refresh_month().await;
        }
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(user = %self.user, error = %e, "diary operation failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
