use crate::CalendarDate;

/// Anchor shared by linked calendar panels.
///
/// When enabled, the anchor follows the range's end date and moves by whole
/// months on navigation. Secondary panels show `anchor - offset` months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkedNavigation {
    anchor: Option<CalendarDate>,
}

impl LinkedNavigation {
    /// Linking switched off; every operation is a no-op
    pub const fn disabled() -> Self {
        Self { anchor: None }
    }

    /// Seeds the anchor with `end_date` when `enabled`
    pub const fn new(enabled: bool, end_date: CalendarDate) -> Self {
        if enabled {
            Self { anchor: Some(end_date) }
        } else {
            Self::disabled()
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.anchor.is_some()
    }

    pub const fn anchor(&self) -> Option<CalendarDate> {
        self.anchor
    }

    pub fn on_range_changed(&mut self, new_end_date: CalendarDate) {
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = new_end_date;
        }
    }

    /// Moves the anchor by `delta_months` (any sign)
    pub fn on_navigate(&mut self, delta_months: i32) {
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = anchor.add_months(delta_months);
            tracing::debug!(delta_months, anchor = %anchor, "linked calendars navigated");
        }
    }

    /// First day of the month shown by the panel `offset` months before the anchor
    pub fn panel_month(&self, offset: i32) -> Option<CalendarDate> {
        self.anchor
            .map(|anchor| anchor.add_months(offset.saturating_neg()).first_of_month())
    }
}
