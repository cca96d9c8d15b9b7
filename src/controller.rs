//! The picker's owner object.
//!
//! [`RangeController`] holds the canonical range and wires the selection
//! state machine, the normalizer and linked navigation together. Observers
//! hear about the first stable range once, then about every accepted change.

use crate::link::LinkedNavigation;
use crate::parse::{DateFormat, DateInput, ParseError};
use crate::selection::{Pick, SelectionStateMachine};
use crate::{CalendarDate, DateRange, DateRangeConfig, Endpoint, Endpoints, SelectionStep, SourceTag};

/// Notification handed to closure observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEvent<'a> {
    Init(&'a DateRange),
    Change {
        range:  &'a DateRange,
        source: Option<&'a SourceTag>,
    },
}

/// Receives range notifications. Both methods default to doing nothing.
pub trait RangeObserver {
    /// Called once, after construction, with the first normalized range
    fn on_init(&mut self, _range: &DateRange) {}

    /// Called after every accepted pick or reconciled external update
    fn on_change(&mut self, _range: &DateRange, _source: Option<&SourceTag>) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RangeObserver for NoopObserver {}

impl<F> RangeObserver for F
where
    F: FnMut(RangeEvent<'_>),
{
    fn on_init(&mut self, range: &DateRange) {
        (*self)(RangeEvent::Init(range));
    }

    fn on_change(&mut self, range: &DateRange, source: Option<&SourceTag>) {
        (*self)(RangeEvent::Change { range, source });
    }
}

#[derive(Debug)]
pub struct RangeController<O = NoopObserver> {
    config:       DateRangeConfig,
    format:       DateFormat,
    range:        DateRange,
    selection:    SelectionStateMachine,
    link:         LinkedNavigation,
    /// Endpoints as last parsed from caller-supplied inputs, before ordering
    parsed:       Endpoints,
    pinned_today: Option<CalendarDate>,
    observer:     O,
}

impl<O: RangeObserver> RangeController<O> {
    /// Parses the initial endpoints and publishes the first range to `observer.on_init`.
    ///
    /// # Errors
    /// Returns a `ParseError` if the format is malformed or either input does not match it.
    pub fn new(start: DateInput, end: DateInput, config: DateRangeConfig, observer: O) -> Result<Self, ParseError> {
        Self::build(None, &start, &end, config, observer)
    }

    /// Like [`RangeController::new`], but relative inputs resolve against `today`
    /// instead of the local clock, now and on every later update.
    ///
    /// # Errors
    /// See [`RangeController::new`].
    pub fn new_at(
        today: CalendarDate,
        start: DateInput,
        end: DateInput,
        config: DateRangeConfig,
        observer: O,
    ) -> Result<Self, ParseError> {
        Self::build(Some(today), &start, &end, config, observer)
    }

    fn build(
        pinned_today: Option<CalendarDate>,
        start: &DateInput,
        end: &DateInput,
        config: DateRangeConfig,
        observer: O,
    ) -> Result<Self, ParseError> {
        let format = DateFormat::new(&config.format)?;
        let today = pinned_today.unwrap_or_else(CalendarDate::today);
        let parsed = Endpoints::new(start.resolve(&format, today)?, end.resolve(&format, today)?);
        let range = parsed.normalize();

        let mut controller = Self {
            selection: SelectionStateMachine::new(config.force_edit_endpoint()),
            link: LinkedNavigation::new(config.linking_active(), range.end_date()),
            config,
            format,
            range,
            parsed,
            pinned_today,
            observer,
        };

        tracing::debug!(range = %controller.range, linked = controller.link.is_enabled(), "date range initialized");
        controller.observer.on_init(&controller.range);
        Ok(controller)
    }

    /// Feeds a pick through the selection cycle and publishes the ordered result.
    pub fn apply_pick(&mut self, pick: impl Into<Pick>, source: Option<SourceTag>) -> DateRange {
        let (candidate, emit) = self.selection.handle_pick(pick.into(), self.range);
        let range = candidate.normalize();
        self.publish(range, emit, source.as_ref());
        range
    }

    /// Reconciles caller-supplied endpoints with the current selection.
    ///
    /// Provided inputs are parsed with `format` (or the configured one) and
    /// compared with the values parsed last time. Only a real difference is
    /// applied: the merged pair replaces the range as a whole, even when an
    /// endpoint is forced, the cycle restarts and observers get no source tag.
    /// A missing endpoint keeps its previous value. Returns whether the range
    /// was updated.
    ///
    /// # Errors
    /// Returns a `ParseError` if parsing fails; nothing is changed in that case.
    pub fn apply_external_range_update(
        &mut self,
        start: Option<DateInput>,
        end: Option<DateInput>,
        format: Option<&str>,
    ) -> Result<bool, ParseError> {
        if start.is_none() && end.is_none() {
            return Ok(false);
        }

        let format = match format {
            Some(pattern) => DateFormat::new(pattern)?,
            None => self.format.clone(),
        };
        let today = self.today();
        let new_start = start.map(|input| input.resolve(&format, today)).transpose()?;
        let new_end = end.map(|input| input.resolve(&format, today)).transpose()?;

        let previous = self.parsed;
        let changed = new_start.is_some_and(|d| d != previous.start_date)
            || new_end.is_some_and(|d| d != previous.end_date);

        let merged = Endpoints::new(
            new_start.unwrap_or(previous.start_date),
            new_end.unwrap_or(previous.end_date),
        );
        self.parsed = merged;

        if !changed {
            tracing::debug!(%merged, "external range unchanged, skipping");
            return Ok(false);
        }

        tracing::debug!(from = %previous, to = %merged, "external range update");
        self.selection.restart();
        self.publish(merged.normalize(), true, None);
        Ok(true)
    }

    /// Moves linked panels by whole months. Returns the new anchor, if linking is on.
    pub fn navigate(&mut self, delta_months: i32) -> Option<CalendarDate> {
        self.link.on_navigate(delta_months);
        self.link.anchor()
    }

    /// Replaces the configuration wholesale.
    ///
    /// The selection cycle restarts. The link anchor is kept if linking stays
    /// on, seeded from the end date if it turns on, and dropped if it turns off.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if the new pattern is malformed; the old configuration is kept.
    pub fn reconfigure(&mut self, config: DateRangeConfig) -> Result<(), ParseError> {
        let format = DateFormat::new(&config.format)?;

        self.selection = SelectionStateMachine::new(config.force_edit_endpoint());
        self.link = match (self.link.is_enabled(), config.linking_active()) {
            (true, true) => self.link,
            (_, enabled) => LinkedNavigation::new(enabled, self.range.end_date()),
        };
        self.format = format;
        self.config = config;
        Ok(())
    }

    /// First day of the month shown by each panel, oldest first.
    ///
    /// Linked panels are offset from the anchor; otherwise they count back from the end date.
    pub fn panel_months(&self) -> Vec<CalendarDate> {
        let base = self.link.anchor().unwrap_or_else(|| self.range.end_date());
        (0..i32::from(self.config.calendars))
            .rev()
            .map(|offset| base.add_months(-offset).first_of_month())
            .collect()
    }

    /// Start and end rendered with the configured pattern, for text inputs.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if the pattern cannot render a date.
    pub fn formatted_range(&self) -> Result<(String, String), ParseError> {
        Ok((
            self.format.format(self.range.start_date())?,
            self.format.format(self.range.end_date())?,
        ))
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub const fn step(&self) -> SelectionStep {
        self.selection.step()
    }

    pub const fn force_edit(&self) -> Option<Endpoint> {
        self.selection.force_edit()
    }

    pub const fn link(&self) -> &LinkedNavigation {
        &self.link
    }

    pub const fn config(&self) -> &DateRangeConfig {
        &self.config
    }

    pub const fn format(&self) -> &DateFormat {
        &self.format
    }

    pub const fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn publish(&mut self, range: DateRange, emit: bool, source: Option<&SourceTag>) {
        self.range = range;
        self.link.on_range_changed(range.end_date());
        if emit {
            self.observer.on_change(&range, source);
        }
    }

    fn today(&self) -> CalendarDate {
        self.pinned_today.unwrap_or_else(CalendarDate::today)
    }
}
