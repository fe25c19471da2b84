//! Relative time windows used to filter expenses for display and stats.

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};
use std::fmt::Display;
use std::str::FromStr;

/// A calendar range relative to the evaluation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    /// The evaluation day itself.
    Day,
    /// Sunday through Saturday of the week containing the evaluation day.
    Week,
    /// The calendar month containing the evaluation day.
    Month,
    /// No restriction.
    All,
}

impl Window {
    /// Whether a record dated `date` belongs to this window relative to
    /// `today`. Both are local calendar dates.
    ///
    /// The week is derived by day arithmetic, so it crosses month and year
    /// boundaries correctly.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Window::Day => date == today,
            Window::Week => {
                let start = today - Days::new(today.weekday().num_days_from_sunday() as u64);
                date >= start && date < start + Days::new(7)
            }
            Window::Month => date.month() == today.month() && date.year() == today.year(),
            Window::All => true,
        }
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Window::Day => "day",
            Window::Week => "week",
            Window::Month => "month",
            Window::All => "all",
        };
        write!(f, "{value}")
    }
}

impl FromStr for Window {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Window::Day),
            "week" => Ok(Window::Week),
            "month" => Ok(Window::Month),
            "all" => Ok(Window::All),
            _ => Err(anyhow::anyhow!(
                "Invalid window: {s}. Valid values: day, week, month, all"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_matches_only_the_same_date() {
        let today = date(2025, 1, 15);

        assert!(Window::Day.contains(today, today));
        assert!(!Window::Day.contains(date(2025, 1, 14), today));
        assert!(!Window::Day.contains(date(2025, 1, 16), today));
    }

    #[test]
    fn test_week_runs_sunday_through_saturday() {
        // 2025-01-01 is a Wednesday; its week is 2024-12-29 to 2025-01-04.
        let today = date(2025, 1, 1);

        assert!(Window::Week.contains(date(2024, 12, 29), today));
        assert!(Window::Week.contains(today, today));
        assert!(Window::Week.contains(date(2025, 1, 4), today));

        assert!(!Window::Week.contains(date(2024, 12, 28), today));
        assert!(!Window::Week.contains(date(2025, 1, 5), today));
    }

    #[test]
    fn test_week_when_today_is_sunday() {
        // 2025-01-05 is a Sunday, so the week starts on today itself.
        let today = date(2025, 1, 5);

        assert!(Window::Week.contains(today, today));
        assert!(Window::Week.contains(date(2025, 1, 11), today));
        assert!(!Window::Week.contains(date(2025, 1, 4), today));
        assert!(!Window::Week.contains(date(2025, 1, 12), today));
    }

    #[test]
    fn test_month_requires_same_month_and_year() {
        let today = date(2025, 1, 15);

        assert!(Window::Month.contains(date(2025, 1, 1), today));
        assert!(Window::Month.contains(date(2025, 1, 31), today));
        assert!(!Window::Month.contains(date(2025, 2, 1), today));
        assert!(!Window::Month.contains(date(2024, 1, 15), today));
    }

    #[test]
    fn test_all_matches_everything() {
        let today = date(2025, 1, 15);

        assert!(Window::All.contains(date(1999, 12, 31), today));
        assert!(Window::All.contains(date(2030, 6, 1), today));
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for window in [Window::Day, Window::Week, Window::Month, Window::All] {
            let parsed: Window = window.to_string().parse().unwrap();
            assert_eq!(parsed, window);
        }
        assert!("fortnight".parse::<Window>().is_err());
    }
}
