//! Calendar arithmetic shared by the record, the month view and the UI.
//!
//! Months are 0-indexed throughout (0 = January, 11 = December). Month
//! arguments outside that range carry into the year, so month 12 of 2024 is
//! January 2025 and month -1 of 2024 is December 2023.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::HabitError;

const KEY_FORMAT: &str = "%Y-%m-%d";

fn normalize(year: i32, month: i64) -> (i32, u32) {
    let total = i64::from(year) * 12 + month;
    (total.div_euclid(12) as i32, total.rem_euclid(12) as u32)
}

fn first_of_month(year: i32, month: i64) -> Option<NaiveDate> {
    let (year, month) = normalize(year, month);
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

/// Number of days in `month`, taken as the day before the 1st of the next
/// month. Years outside chrono's range have no days.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    first_of_month(year, i64::from(month) + 1)
        .and_then(|next_first| next_first.pred_opt())
        .map_or(0, |last| last.day())
}

/// Weekday column of the 1st of the month, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    first_of_month(year, i64::from(month))
        .map_or(0, |first| first.weekday().num_days_from_sunday())
}

/// Canonical key for a day, or `None` when the month has no such day.
pub fn format_key(year: i32, month: u32, day: u32) -> Option<DayKey> {
    let (year, month) = normalize(year, i64::from(month));
    NaiveDate::from_ymd_opt(year, month + 1, day).map(DayKey::from_date)
}

/// Canonical `YYYY-MM-DD` identifier of a calendar date.
///
/// A key can only be built from a real date or parsed from its canonical
/// text, so a malformed key never reaches a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.0)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, KEY_FORMAT)
            .map_err(|_| HabitError::InvalidDate(s.to_string()))?;
        let key = DayKey(date);

        // chrono accepts unpadded fields; only the canonical spelling is a key.
        if key.to_string() != s {
            return Err(HabitError::InvalidDate(s.to_string()));
        }
        Ok(key)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A calendar month without a day component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        let (year, month) = normalize(year, i64::from(month));
        YearMonth { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-indexed month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn shifted(&self, delta: i32) -> Self {
        let (year, month) = normalize(self.year, i64::from(self.month) + i64::from(delta));
        YearMonth { year, month }
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn first_weekday_offset(&self) -> u32 {
        first_weekday_offset(self.year, self.month)
    }

    pub fn key(&self, day: u32) -> Option<DayKey> {
        format_key(self.year, self.month, day)
    }

    pub fn contains(&self, key: &DayKey) -> bool {
        key.year_month() == *self
    }

    /// `YYYY-MM`, the prefix shared by every key of this month.
    pub fn key_prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month + 1)
    }

    pub fn label(&self) -> String {
        first_of_month(self.year, i64::from(self.month))
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_else(|| self.key_prefix())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_prefix())
    }
}

impl FromStr for YearMonth {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s), KEY_FORMAT)
            .map_err(|_| HabitError::InvalidMonth(s.to_string()))?;
        let month = YearMonth::from_date(first);
        if month.key_prefix() != s {
            return Err(HabitError::InvalidMonth(s.to_string()));
        }
        Ok(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_follows_calendar() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2024, 0), 31);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn test_first_weekday_offset_sunday_based() {
        assert_eq!(first_weekday_offset(2024, 1), 4);
        assert_eq!(first_weekday_offset(2024, 8), 0);
        assert_eq!(first_weekday_offset(2024, 5), 6);
        assert_eq!(first_weekday_offset(2024, 0), 1);
    }

    #[test]
    fn test_format_key_zero_pads_and_shifts_month() {
        let key = format_key(2024, 1, 5).unwrap();
        assert_eq!(key.to_string(), "2024-02-05");
        assert_eq!(format_key(2024, 11, 31).unwrap().to_string(), "2024-12-31");
        assert!(format_key(2024, 1, 30).is_none());
        assert!(format_key(2024, 1, 0).is_none());
    }

    #[test]
    fn test_day_key_parse_accepts_only_canonical_text() {
        let key: DayKey = "2024-02-10".parse().unwrap();
        assert_eq!(key, format_key(2024, 1, 10).unwrap());

        assert!("2024-2-10".parse::<DayKey>().is_err());
        assert!("2024-02-30".parse::<DayKey>().is_err());
        assert!("2024-02-10x".parse::<DayKey>().is_err());
        assert!("garbage".parse::<DayKey>().is_err());
        assert!("".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_day_keys_order_chronologically() {
        let a: DayKey = "2023-12-31".parse().unwrap();
        let b: DayKey = "2024-01-01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_year_month_normalizes_out_of_range_months() {
        assert_eq!(YearMonth::new(2024, 12), YearMonth::new(2025, 0));
        assert_eq!(YearMonth::new(2024, -1), YearMonth::new(2023, 11));
        assert_eq!(YearMonth::new(2024, -13).year(), 2022);
        assert_eq!(YearMonth::new(2024, -13).month(), 11);
    }

    #[test]
    fn test_year_month_navigation_rolls_over() {
        let jan = YearMonth::new(2024, 0);
        assert_eq!(jan.previous(), YearMonth::new(2023, 11));

        let dec = YearMonth::new(2024, 11);
        assert_eq!(dec.next(), YearMonth::new(2025, 0));
        assert_eq!(dec.next().previous(), dec);
    }

    #[test]
    fn test_year_month_labels() {
        let feb = YearMonth::new(2024, 1);
        assert_eq!(feb.key_prefix(), "2024-02");
        assert_eq!(feb.label(), "February 2024");
        assert_eq!("2024-02".parse::<YearMonth>().unwrap(), feb);
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-2".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_contains_only_its_keys() {
        let feb = YearMonth::new(2024, 1);
        assert!(feb.contains(&"2024-02-29".parse().unwrap()));
        assert!(!feb.contains(&"2024-03-01".parse().unwrap()));
        assert!(!feb.contains(&"2023-02-10".parse().unwrap()));
    }
}
