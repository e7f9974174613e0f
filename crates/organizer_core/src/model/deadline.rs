//! Task deadline: a calendar date with an optional time of day.
//!
//! # Invariants
//! - Text form is `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`.
//! - Day-level comparisons ignore the time component.

use crate::model::validation::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl Deadline {
    /// Date-only deadline.
    pub fn on(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Deadline at a specific local time of day.
    pub fn at(at: NaiveDateTime) -> Self {
        Self {
            date: at.date(),
            time: Some(at.time()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Point in time used for ordering; undated times count as midnight.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Whether this deadline falls on `day`, ignoring time of day.
    pub fn falls_on(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}

impl FromStr for Deadline {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(Self::on(date));
        }
        for format in [MINUTE_FORMAT, SECOND_FORMAT] {
            if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::at(at));
            }
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|at| Self::at(at.naive_local()))
            .map_err(|_| ValidationError::InvalidDeadline(value.to_string()))
    }
}

impl TryFrom<String> for Deadline {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Deadline> for String {
    fn from(value: Deadline) -> Self {
        value.to_string()
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.time {
            None => write!(f, "{}", self.date.format(DATE_FORMAT)),
            Some(time) => write!(f, "{}", self.date.and_time(time).format(MINUTE_FORMAT)),
        }
    }
}

/// Reads an optional deadline where an empty string also means undated.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Deadline>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
