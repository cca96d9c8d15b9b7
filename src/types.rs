use crate::consts::{END_DATE_KEY, ISO_DATE, START_DATE_KEY};
use crate::{ParseError, prelude::*};
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day with no time or zone attached.
///
/// Wraps `chrono::NaiveDate`; derefs to it so `Datelike` accessors are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From, Into)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from year, month and day, returning `None` if it does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The current local date
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Returns the underlying `NaiveDate`
    #[inline]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    /// True if `self` falls strictly after `other`
    #[inline]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Moves by whole months, clamping the day to the target month's length.
    ///
    /// Saturates at the bounds of the supported calendar.
    pub fn add_months(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.0.checked_add_months(months).unwrap_or(NaiveDate::MAX)
        } else {
            self.0.checked_sub_months(months).unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    /// Moves by whole days, saturating at the bounds of the supported calendar
    pub fn add_days(self, delta: i64) -> Self {
        let days = Days::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.0.checked_add_days(days).unwrap_or(NaiveDate::MAX)
        } else {
            self.0.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    /// First day of this date's month
    pub fn first_of_month(self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        NaiveDate::parse_from_str(trimmed, ISO_DATE)
            .map(Self)
            .map_err(|_| ParseError::InvalidDate {
                input:  trimmed.to_owned(),
                format: ISO_DATE.to_owned(),
            })
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    #[serde(rename = "startDate")]
    Start,
    #[serde(rename = "endDate")]
    End,
}

/// Returned when an endpoint name is neither `startDate` nor `endDate`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "Unknown range endpoint: {_0}")]
pub struct UnknownEndpoint(pub String);

impl std::error::Error for UnknownEndpoint {}

impl Endpoint {
    /// Position of the endpoint in the selection cycle (0 for start, 1 for end)
    pub const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    /// Configuration key naming this endpoint
    pub const fn key(self) -> &'static str {
        match self {
            Self::Start => START_DATE_KEY,
            Self::End => END_DATE_KEY,
        }
    }
}

impl FromStr for Endpoint {
    type Err = UnknownEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            START_DATE_KEY => Ok(Self::Start),
            END_DATE_KEY => Ok(Self::End),
            other => Err(UnknownEndpoint(other.to_owned())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Phase of the two-click selection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionStep {
    /// The next pick starts a cycle
    #[default]
    Begin,
    /// The next pick sets the end and closes the cycle
    Complete,
}

impl SelectionStep {
    pub const fn index(self) -> usize {
        match self {
            Self::Begin => 0,
            Self::Complete => 1,
        }
    }
}

/// Opaque tag naming what produced a range change. Never interpreted, only forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(String);

impl SourceTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceTag {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
