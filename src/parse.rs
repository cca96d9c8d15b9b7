//! Turns raw picker inputs into [`CalendarDate`]s.
//!
//! Patterns use the day/month/year tokens familiar from JavaScript date
//! libraries (`DD/MM/YYYY`, `MMM D, YYYY`, ...) and are translated once into a
//! `chrono` format string. Text in square brackets is matched literally.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::CalendarDate;
use crate::consts::{ESCAPE_CLOSE, ESCAPE_OPEN};

/// Pattern tokens, longest first within each family.
const TOKENS: [(&str, &str); 8] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid date {input:?} for format {format:?}")]
    InvalidDate { input: String, format: String },

    #[error("Empty date string")]
    EmptyInput,

    #[error("Invalid format pattern: {0}")]
    InvalidFormat(String),
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern:  String,
    strftime: String,
}

impl DateFormat {
    /// Compiles a pattern.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if the pattern is empty or has an unterminated `[` escape.
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        if pattern.trim().is_empty() {
            return Err(ParseError::InvalidFormat(pattern.to_owned()));
        }
        Ok(Self {
            pattern:  pattern.to_owned(),
            strftime: translate(pattern)?,
        })
    }

    /// The pattern as written by the caller
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parses text that must match the whole pattern.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` for blank text and `ParseError::InvalidDate` otherwise.
    pub fn parse(&self, text: &str) -> Result<CalendarDate, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        NaiveDate::parse_from_str(trimmed, &self.strftime)
            .map(CalendarDate::from)
            .map_err(|_| ParseError::InvalidDate {
                input:  trimmed.to_owned(),
                format: self.pattern.clone(),
            })
    }

    /// Renders a date with this pattern.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if chrono rejects the compiled pattern.
    pub fn format(&self, date: CalendarDate) -> Result<String, ParseError> {
        let mut out = String::new();
        write!(out, "{}", date.naive().format(&self.strftime))
            .map_err(|_| ParseError::InvalidFormat(self.pattern.clone()))?;
        Ok(out)
    }
}

fn push_literal(out: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

fn translate(pattern: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == ESCAPE_OPEN {
            let close = rest
                .find(ESCAPE_CLOSE)
                .ok_or_else(|| ParseError::InvalidFormat(pattern.to_owned()))?;
            push_literal(&mut out, &rest[c.len_utf8()..close]);
            rest = &rest[close + ESCAPE_CLOSE.len_utf8()..];
        } else if let Some((token, spec)) = TOKENS.iter().find(|(token, _)| rest.starts_with(*token)) {
            out.push_str(spec);
            rest = &rest[token.len()..];
        } else {
            push_literal(&mut out, &rest[..c.len_utf8()]);
            rest = &rest[c.len_utf8()..];
        }
    }

    Ok(out)
}

/// Derives an input from today's date
pub type Producer = Arc<dyn Fn(CalendarDate) -> DateInput + Send + Sync>;

/// Anything a caller may hand in as a date.
#[derive(Clone, Default)]
pub enum DateInput {
    /// No value given; resolves to today
    #[default]
    Today,
    /// Text to parse with the active pattern
    Text(String),
    /// An already-resolved date
    Date(CalendarDate),
    /// Called with today, its result resolved in turn
    Producer(Producer),
}

impl DateInput {
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn(CalendarDate) -> Self + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(f))
    }

    /// Resolves the input against a pattern, using `today` for relative inputs.
    ///
    /// # Errors
    /// Returns a `ParseError` when text does not match the pattern.
    pub fn resolve(&self, format: &DateFormat, today: CalendarDate) -> Result<CalendarDate, ParseError> {
        match self {
            Self::Today => Ok(today),
            Self::Text(text) => format.parse(text),
            Self::Date(date) => Ok(*date),
            Self::Producer(produce) => produce(today).resolve(format, today),
        }
    }
}

impl fmt::Debug for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Date(date) => f.debug_tuple("Date").field(date).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<CalendarDate> for DateInput {
    fn from(value: CalendarDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.into())
    }
}

/// Resolves an input with a pattern, taking today from the local clock.
///
/// # Errors
/// Returns a `ParseError` if the pattern is malformed or the input does not match it.
pub fn parse_input(input: &DateInput, pattern: &str) -> Result<CalendarDate, ParseError> {
    input.resolve(&DateFormat::new(pattern)?, CalendarDate::today())
}
