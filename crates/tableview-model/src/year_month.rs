#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::ModelError;
use crate::record::FieldValue;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ModelError> {
        if !(1..=12).contains(&month) {
            return Err(ModelError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Month containing a unix timestamp (seconds, UTC).
    pub fn from_timestamp(seconds: i64) -> Option<Self> {
        let datetime = DateTime::from_timestamp(seconds, 0)?;
        Some(Self {
            year: datetime.year(),
            month: datetime.month(),
        })
    }

    /// Interpret a record cell as a month.
    ///
    /// Numbers are unix timestamps in seconds; text is any format accepted
    /// by [`YearMonth::from_str`].
    pub fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(n) if n.is_finite() => Self::from_timestamp(*n as i64),
            FieldValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for YearMonth {
    type Err = ModelError;

    /// Accepts `YYYY-MM`, `YYYY-MM-DD` and RFC 3339 timestamps.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self {
                year: datetime.year(),
                month: datetime.month(),
            });
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self {
                year: date.year(),
                month: date.month(),
            });
        }
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| ModelError::InvalidYearMonth(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ModelError::InvalidYearMonth(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ModelError::InvalidYearMonth(s.to_string()))?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl serde::Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
