//! Selection logic for interactive date-range pickers.
//!
//! The crate decides what a range becomes when a user clicks days across one
//! or more calendar panels: a two-click cycle (first click collapses the range
//! to a day, second click closes it), optional pinning of every click to one
//! endpoint, and an anchor that keeps linked panels in step. Rendering is left
//! to the caller, which forwards picks and draws whatever range comes back.
//!
//! ```
//! use date_range_picker::{CalendarDate, DateRangeConfig, NoopObserver, RangeController, SourceTag};
//!
//! let mut picker = RangeController::new(
//!     "01/01/2024".into(),
//!     "01/01/2024".into(),
//!     DateRangeConfig::default(),
//!     NoopObserver,
//! )?;
//!
//! let first = CalendarDate::from_ymd(2024, 1, 20).unwrap();
//! let second = CalendarDate::from_ymd(2024, 1, 12).unwrap();
//! picker.apply_pick(first, Some(SourceTag::from("calendar-0")));
//! let range = picker.apply_pick(second, Some(SourceTag::from("calendar-0")));
//!
//! assert_eq!(range.to_string(), "2024-01-12/2024-01-20");
//! # Ok::<(), date_range_picker::ParseError>(())
//! ```

mod config;
mod consts;
mod controller;
mod link;
mod parse;
mod prelude;
mod presets;
mod range;
mod selection;
mod types;

#[cfg(test)]
mod test_utils;

pub use config::DateRangeConfig;
pub use consts::*;
pub use controller::{NoopObserver, RangeController, RangeEvent, RangeObserver};
pub use link::LinkedNavigation;
pub use parse::{DateFormat, DateInput, ParseError, Producer, parse_input};
pub use presets::{Preset, PresetList, default_presets};
pub use range::{DateRange, Endpoints, RangeError, normalize};
pub use selection::{Pick, SelectionStateMachine, Transition, transition};
pub use types::{CalendarDate, Endpoint, SelectionStep, SourceTag, UnknownEndpoint};
