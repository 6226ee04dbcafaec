mod config_cmd;
mod entry;
mod view;

pub use config_cmd::ConfigCommand;
pub use entry::{AddArgs, DeleteArgs, EditArgs};
pub use view::{CalendarArgs, DayArgs, SummaryArgs};

use chrono::NaiveDate;
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse a YYYY-MM-DD command-line date
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        let err = parse_date("03/01/2024").unwrap_err();
        assert_eq!(err, "Invalid date format '03/01/2024'. Use YYYY-MM-DD.");
    }
}
