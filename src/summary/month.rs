use crate::presentation::Presentation;
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::warn;

/// The reference date used to select a calendar month for the category breakdown.
///
/// Only the month and year are used for filtering, but the day is kept so that navigating
/// forwards and backwards behaves like calendar arithmetic: the day is clamped to the last day
/// of shorter months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectedMonth {
    date: NaiveDate,
}

impl SelectedMonth {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// The month containing today's date in the local time zone.
    pub fn current() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// One-based month number.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Advances by exactly one calendar month.
    pub fn next(self) -> Self {
        self.shift(1)
    }

    /// Goes back by exactly one calendar month.
    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    /// Moves by `months` calendar months, forwards if positive and backwards if negative.
    ///
    /// There are no bounds. If the result would fall outside of the dates that can be
    /// represented, the selection stays where it is.
    pub fn shift(self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.date.checked_add_months(delta)
        } else {
            self.date.checked_sub_months(delta)
        };
        match moved {
            Some(date) => Self::new(date),
            None => {
                warn!("Unable to move {months} months from {}", self.date);
                self
            }
        }
    }

    /// Returns true if `date` falls in the same month of the same year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// e.g. `outubro, 2026`.
    pub fn label(&self, presentation: &Presentation) -> String {
        presentation.month_and_year(self.date)
    }
}

impl Default for SelectedMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl Display for SelectedMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m"))
    }
}

impl FromStr for SelectedMonth {
    type Err = chrono::ParseError;

    /// Parses `YYYY-MM` into the first day of that month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")?;
        Ok(Self::new(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Locale;

    fn month(y: i32, m: u32, d: u32) -> SelectedMonth {
        SelectedMonth::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_next_and_prev() {
        assert_eq!(month(2026, 10, 15).next(), month(2026, 11, 15));
        assert_eq!(month(2026, 12, 15).next(), month(2027, 1, 15));
        assert_eq!(month(2026, 1, 15).prev(), month(2025, 12, 15));
    }

    #[test]
    fn test_next_then_prev_is_reversible() {
        let start = month(2026, 10, 15);
        assert_eq!(start.next().prev(), start);
        assert_eq!(start.prev().next(), start);
        assert_eq!(start.shift(25).shift(-25), start);
    }

    #[test]
    fn test_day_is_clamped() {
        let start = month(2026, 1, 31);
        let feb = start.next();
        assert_eq!(feb, month(2026, 2, 28));
        // The clamped day is not restored.
        assert_eq!(feb.prev(), month(2026, 1, 28));
    }

    #[test]
    fn test_unbounded_navigation() {
        let far = month(2026, 10, 1).shift(-12 * 3000);
        assert_eq!(far.year(), -974);
        assert_eq!(far.month(), 10);
    }

    #[test]
    fn test_out_of_range_stays_put() {
        let last = SelectedMonth::new(NaiveDate::MAX);
        assert_eq!(last.next(), last);
    }

    #[test]
    fn test_contains() {
        let oct = month(2026, 10, 15);
        assert!(oct.contains(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()));
        assert!(oct.contains(NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()));
        assert!(!oct.contains(NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()));
        assert!(!oct.contains(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()));
    }

    #[test]
    fn test_parse_and_display() {
        let m: SelectedMonth = "2026-03".parse().unwrap();
        assert_eq!(m, month(2026, 3, 1));
        assert_eq!(m.to_string(), "2026-03");
        assert!("2026-13".parse::<SelectedMonth>().is_err());
        assert!("march".parse::<SelectedMonth>().is_err());
    }

    #[test]
    fn test_label() {
        let p = Presentation::new(Locale::PtBr);
        assert_eq!(month(2026, 10, 15).label(&p), "outubro, 2026");
    }
}
