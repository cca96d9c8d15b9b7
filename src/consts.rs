/// Default parse/format pattern (day/month/year)
pub const DEFAULT_FORMAT: &str = "DD/MM/YYYY";

/// Default number of calendar panels
pub const DEFAULT_CALENDARS: u8 = 2;

/// Linking only affects layouts with at least this many panels
pub const MIN_LINKED_CALENDARS: u8 = 2;

/// Wire name of the start endpoint
pub const START_DATE_KEY: &str = "startDate";
/// Wire name of the end endpoint
pub const END_DATE_KEY: &str = "endDate";

/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Opening bracket of an escaped literal in a format pattern
pub(crate) const ESCAPE_OPEN: char = '[';
/// Closing bracket of an escaped literal in a format pattern
pub(crate) const ESCAPE_CLOSE: char = ']';

/// ISO date layout used for `Display` and serde
pub(crate) const ISO_DATE: &str = "%Y-%m-%d";
