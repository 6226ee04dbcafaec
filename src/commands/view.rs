use chrono::{Days, Local, NaiveDate};
use clap::Args;

use fooddiary_core::{DiaryController, FoodEntryStore, YearMonth};

use super::{parse_date, OutputFormat};
use crate::render;

#[derive(Args)]
pub struct DayArgs {
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DayArgs {
    pub async fn run<S: FoodEntryStore + ?Sized>(
        &self,
        diary: &mut DiaryController<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };

        diary.select_date(date).await?;
        let log = diary.day_view().ok_or("Daily log unavailable")?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(log)?),
            OutputFormat::Text => print!("{}", render::day_log(log)),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Start date (YYYY-MM-DD), defaults to 6 days before --to
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub to: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SummaryArgs {
    fn range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), String> {
        let to = match &self.to {
            Some(d) => parse_date(d)?,
            None => today,
        };
        let from = match &self.from {
            Some(d) => parse_date(d)?,
            None => to
                .checked_sub_days(Days::new(6))
                .ok_or_else(|| format!("No week of dates ends at {}. Pass --from.", to))?,
        };
        Ok((from, to))
    }

    pub async fn run<S: FoodEntryStore + ?Sized>(
        &self,
        diary: &mut DiaryController<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (from, to) = self.range(Local::now().date_naive())?;
        let summary = diary
            .service()
            .summarize_range(diary.user(), from, to)
            .await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Text => print!("{}", render::range_summary(&summary)),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Month (YYYY-MM), defaults to the current month
    pub month: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CalendarArgs {
    pub async fn run<S: FoodEntryStore + ?Sized>(
        &self,
        diary: &mut DiaryController<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let month = match &self.month {
            Some(m) => m.parse::<YearMonth>()?,
            None => diary.displayed_month(),
        };

        diary.show_month(month).await?;
        let view = diary.month_view().ok_or("Calendar unavailable")?;

        match self.format {
            OutputFormat::Json => {
                let body = serde_json::json!({
                    "month": view.month,
                    "days": view.days,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            OutputFormat::Text => {
                let selected = Some(diary.selected_date()).filter(|d| month.contains(*d));
                print!("{}", render::calendar(view, selected));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fooddiary_core::{DiaryService, MealType, MemoryFoodEntryStore, NewFoodEntry, UserId};
    use std::sync::Arc;

    #[derive(Parser)]
    struct SummaryCli {
        #[command(flatten)]
        args: SummaryArgs,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn diary(today: NaiveDate) -> DiaryController<MemoryFoodEntryStore> {
        let service = DiaryService::new(Arc::new(MemoryFoodEntryStore::new()));
        DiaryController::new(service, UserId::new("user1").unwrap(), today)
    }

    #[test]
    fn test_summary_defaults_to_last_seven_days() {
        let cli = SummaryCli::parse_from(["summary"]);
        let (from, to) = cli.args.range(date(2024, 3, 10)).unwrap();
        assert_eq!(from, date(2024, 3, 4));
        assert_eq!(to, date(2024, 3, 10));
    }

    #[test]
    fn test_summary_explicit_range() {
        let cli =
            SummaryCli::parse_from(["summary", "--from", "2024-02-28", "--to", "2024-03-02"]);
        let (from, to) = cli.args.range(date(2024, 3, 10)).unwrap();
        assert_eq!(from, date(2024, 2, 28));
        assert_eq!(to, date(2024, 3, 2));
    }

    #[test]
    fn test_summary_default_start_before_earliest_date() {
        let cli = SummaryCli::parse_from(["summary"]);
        assert!(cli.args.range(NaiveDate::MIN).is_err());

        let cli = SummaryCli::parse_from(["summary", "--from", "2024-03-01"]);
        let (from, to) = cli.args.range(date(2024, 3, 1)).unwrap();
        assert_eq!(from, to);
    }

    #[tokio::test]
    async fn test_summary_command_rejects_oversized_range() {
        let mut diary = diary(date(2024, 3, 1));
        let args = SummaryArgs {
            from: Some("2020-01-01".to_string()),
            to: Some("2024-03-01".to_string()),
            format: OutputFormat::Text,
        };
        let err = args.run(&mut diary).await.unwrap_err();
        assert!(err.to_string().contains("spans more than 366 days"));
    }

    #[tokio::test]
    async fn test_day_command_loads_view() {
        let mut diary = diary(date(2024, 3, 1));
        let soup = NewFoodEntry::new(date(2024, 3, 5), MealType::Lunch, "Soup").with_calories(200);
        diary.add_entry(soup).await.unwrap();

        let args = DayArgs {
            date: Some("2024-03-05".to_string()),
            format: OutputFormat::Json,
        };
        args.run(&mut diary).await.unwrap();

        let log = diary.day_view().unwrap();
        assert_eq!(log.date, date(2024, 3, 5));
        assert_eq!(log.nutrition.total_calories, 200);
    }

    #[tokio::test]
    async fn test_summary_command_rejects_reversed_range() {
        let mut diary = diary(date(2024, 3, 1));
        let args = SummaryArgs {
            from: Some("2024-03-03".to_string()),
            to: Some("2024-03-01".to_string()),
            format: OutputFormat::Text,
        };
        let err = args.run(&mut diary).await.unwrap_err();
        assert!(err.to_string().contains("Invalid date range"));
    }

    #[tokio::test]
    async fn test_calendar_command_moves_displayed_month() {
        let mut diary = diary(date(2024, 3, 1));
        let args = CalendarArgs {
            month: Some("2024-02".to_string()),
            format: OutputFormat::Text,
        };
        args.run(&mut diary).await.unwrap();

        let view = diary.month_view().unwrap();
        assert_eq!(view.month, YearMonth::new(2024, 2).unwrap());
        assert_eq!(view.days.len(), 29);
    }

    #[tokio::test]
    async fn test_calendar_command_bad_month() {
        let mut diary = diary(date(2024, 3, 1));
        let args = CalendarArgs {
            month: Some("2024-13".to_string()),
            format: OutputFormat::Text,
        };
        let err = args.run(&mut diary).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid month '2024-13'. Use YYYY-MM.");
    }
}
