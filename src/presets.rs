//! Named ranges offered next to the calendars ("Today", "Last 7 Days", ...).
//!
//! A preset resolves to a complete pair relative to today and is applied as a
//! [`Pick::Range`], tagged with its label.

use crate::parse::{DateFormat, DateInput, ParseError};
use crate::{CalendarDate, DateRange, Endpoints, Pick, SourceTag};

#[derive(Debug, Clone)]
pub struct Preset {
    label: String,
    start: DateInput,
    end:   DateInput,
}

impl Preset {
    pub fn new(label: impl Into<String>, start: impl Into<DateInput>, end: impl Into<DateInput>) -> Self {
        Self {
            label: label.into(),
            start: start.into(),
            end:   end.into(),
        }
    }

    /// Both ends computed from today by the same function
    pub fn relative<F, G>(label: impl Into<String>, start: F, end: G) -> Self
    where
        F: Fn(CalendarDate) -> CalendarDate + Send + Sync + 'static,
        G: Fn(CalendarDate) -> CalendarDate + Send + Sync + 'static,
    {
        Self::new(
            label,
            DateInput::producer(move |today| DateInput::Date(start(today))),
            DateInput::producer(move |today| DateInput::Date(end(today))),
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolves the preset to an ordered range.
    ///
    /// # Errors
    /// Returns a `ParseError` if a text endpoint does not match `format`.
    pub fn resolve(&self, format: &DateFormat, today: CalendarDate) -> Result<DateRange, ParseError> {
        let start = self.start.resolve(format, today)?;
        let end = self.end.resolve(format, today)?;
        Ok(Endpoints::new(start, end).normalize())
    }

    /// The pick and source tag to hand to the controller.
    ///
    /// # Errors
    /// See [`Preset::resolve`].
    pub fn pick(&self, format: &DateFormat, today: CalendarDate) -> Result<(Pick, SourceTag), ParseError> {
        let range = self.resolve(format, today)?;
        Ok((Pick::from(range), SourceTag::from(self.label.as_str())))
    }
}

/// An ordered preset menu.
#[derive(Debug, Clone, Default)]
pub struct PresetList {
    presets: Vec<Preset>,
}

impl PresetList {
    pub const fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn get(&self, label: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.label == label)
    }

    /// The first preset that resolves to exactly `range`, for highlighting.
    /// Presets that fail to resolve never match.
    pub fn active(&self, range: &DateRange, format: &DateFormat, today: CalendarDate) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|p| p.resolve(format, today).is_ok_and(|resolved| resolved == *range))
    }
}

impl FromIterator<Preset> for PresetList {
    fn from_iter<I: IntoIterator<Item = Preset>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The stock menu: today, yesterday, trailing weeks/months and calendar months.
pub fn default_presets() -> PresetList {
    [
        Preset::new("Today", DateInput::Today, DateInput::Today),
        Preset::relative("Yesterday", |t| t.add_days(-1), |t| t.add_days(-1)),
        Preset::relative("Last 7 Days", |t| t.add_days(-6), |t| t),
        Preset::relative("Last 30 Days", |t| t.add_days(-29), |t| t),
        Preset::relative("This Month", CalendarDate::first_of_month, |t| t),
        Preset::relative(
            "Last Month",
            |t| t.add_months(-1).first_of_month(),
            |t| t.first_of_month().add_days(-1),
        ),
    ]
    .into_iter()
    .collect()
}
