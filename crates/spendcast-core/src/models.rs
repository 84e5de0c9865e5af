//! Domain models for spendcast

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A categorized spending record as stored for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub user_id: i64,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A transaction parsed from a ledger file, not yet bound to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
}

/// A user's profile as needed by the income heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    /// Monthly income
    pub income: f64,
}

/// A calendar year-month, rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Construction guarantees the date exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Advance by whole calendar months
    pub fn plus_months(&self, months: u32) -> Option<Self> {
        self.first_day()
            .checked_add_months(Months::new(months))
            .map(Self::from_date)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month label: {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month label: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in month label: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_display_and_parse() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(ym.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<YearMonth>().unwrap(), ym);
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_plus_months_crosses_year() {
        let nov = YearMonth::new(2025, 11).unwrap();
        assert_eq!(nov.plus_months(1).unwrap().to_string(), "2025-12");
        assert_eq!(nov.plus_months(2).unwrap().to_string(), "2026-01");
        assert_eq!(nov.plus_months(15).unwrap().to_string(), "2027-02");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut months = vec![
            YearMonth::new(2025, 2).unwrap(),
            YearMonth::new(2024, 12).unwrap(),
            YearMonth::new(2025, 1).unwrap(),
        ];
        months.sort();
        let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_serde_as_label() {
        let ym = YearMonth::new(2024, 7).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }
}
