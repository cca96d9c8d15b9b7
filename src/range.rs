use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, Endpoint, ParseError, RANGE_SEPARATOR, prelude::*};

/// Two endpoints in whatever order they were produced.
///
/// This is what pickers and the selection state machine hand around before
/// [`normalize`] turns it into a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start_date}/{end_date}")]
pub struct Endpoints {
    pub start_date: CalendarDate,
    pub end_date:   CalendarDate,
}

impl Endpoints {
    pub const fn new(start_date: CalendarDate, end_date: CalendarDate) -> Self {
        Self { start_date, end_date }
    }

    /// Both endpoints on the same day
    pub const fn single(date: CalendarDate) -> Self {
        Self::new(date, date)
    }

    /// Returns the named endpoint
    pub const fn get(&self, endpoint: Endpoint) -> CalendarDate {
        match endpoint {
            Endpoint::Start => self.start_date,
            Endpoint::End => self.end_date,
        }
    }

    /// Replaces one endpoint, carrying the other over
    #[must_use]
    pub const fn with(self, endpoint: Endpoint, date: CalendarDate) -> Self {
        match endpoint {
            Endpoint::Start => Self::new(date, self.end_date),
            Endpoint::End => Self::new(self.start_date, date),
        }
    }

    /// Orders the endpoints. See [`normalize`].
    pub fn normalize(self) -> DateRange {
        normalize(self)
    }
}

impl From<DateRange> for Endpoints {
    fn from(range: DateRange) -> Self {
        Self::new(range.start_date, range.end_date)
    }
}

/// Returns the endpoints in non-decreasing order, swapping them if the start is after the end.
pub fn normalize(endpoints: Endpoints) -> DateRange {
    let Endpoints { start_date, end_date } = endpoints;
    if start_date.is_after(&end_date) {
        DateRange { start_date: end_date, end_date: start_date }
    } else {
        DateRange { start_date, end_date }
    }
}

/// An inclusive range of calendar days.
/// The start date is always less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start_date}/{end_date}")]
pub struct DateRange {
    start_date: CalendarDate,
    end_date:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start.is_after(&end) {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start_date: start, end_date: end })
    }

    /// Builds a range from two dates given in any order
    pub fn ordered(a: CalendarDate, b: CalendarDate) -> Self {
        normalize(Endpoints::new(a, b))
    }

    /// A range covering a single day
    pub const fn single(date: CalendarDate) -> Self {
        Self { start_date: date, end_date: date }
    }

    pub const fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    pub const fn end_date(&self) -> CalendarDate {
        self.end_date
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start_date, self.end_date)
    }

    /// Checks if the range contains a given day
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start_date <= *date && *date <= self.end_date
    }

    /// Number of days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end_date.naive() - self.start_date.naive()).num_days() + 1
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: use RANGE_SEPARATOR to separate start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.parse::<CalendarDate>()?;
                let end = end_str.parse::<CalendarDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
