use anyhow::{Result, anyhow};
use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Source of the server's current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the date from the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The half-open range `[start, end)` covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    /// The month that `day` falls in.
    pub fn containing(day: NaiveDate) -> Result<Self> {
        let start = day - Days::new(u64::from(day.day0()));
        let end = start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| anyhow!("no month follows {}", start.format("%Y-%m")))?;

        Ok(Self { start, end })
    }

    /// `YYYY-MM`, the prefix every date in the month renders with.
    pub fn prefix(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_range_spans_the_calendar_month() {
        let range = MonthRange::containing(ymd(2026, 2, 15)).unwrap();

        assert_eq!(range.start, ymd(2026, 2, 1));
        assert_eq!(range.end, ymd(2026, 3, 1));
        assert_eq!(range.prefix(), "2026-02");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let range = MonthRange::containing(ymd(2026, 12, 31)).unwrap();

        assert_eq!(range.start, ymd(2026, 12, 1));
        assert_eq!(range.end, ymd(2027, 1, 1));
    }

    #[test]
    fn containment_matches_date_prefix() {
        let range = MonthRange::containing(ymd(2026, 2, 1)).unwrap();

        for day in [
            ymd(2026, 2, 1),
            ymd(2026, 2, 28),
            ymd(2025, 2, 15),
            ymd(2026, 3, 1),
            ymd(2026, 1, 31),
        ] {
            let by_prefix = day.format("%Y-%m-%d").to_string().starts_with(&range.prefix());
            assert_eq!(range.contains(day), by_prefix, "{day}");
        }
    }

    #[test]
    fn fixed_clock_reports_its_date() {
        assert_eq!(FixedClock(ymd(2026, 2, 10)).today(), ymd(2026, 2, 10));
    }
}
