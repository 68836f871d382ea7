use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` identifier for one calendar day.
///
/// Built from the date's calendar-day component only, so any two values that
/// denote the same day map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(KEY_FORMAT).to_string())
    }

    /// Accepts only the canonical form; `2024-3-5` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(value.trim(), KEY_FORMAT).ok()?;
        let key = Self::from_date(date);
        (key.0 == value.trim()).then_some(key)
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, KEY_FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
