use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CALENDARS, DEFAULT_FORMAT, Endpoint, MIN_LINKED_CALENDARS};

/// Recognized picker options. Every field is optional when deserializing.
///
/// ```
/// use date_range_picker::{DateRangeConfig, Endpoint};
///
/// let config: DateRangeConfig =
///     serde_json::from_str(r#"{ "linkedCalendars": true, "forceEdit": "endDate" }"#).unwrap();
/// assert!(config.linking_active());
/// assert_eq!(config.force_edit_endpoint(), Some(Endpoint::End));
/// assert_eq!(config.format, "DD/MM/YYYY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateRangeConfig {
    /// Parse/format pattern for text inputs
    pub format:           String,
    pub linked_calendars: bool,
    /// Raw endpoint name; anything other than `startDate`/`endDate` disables forcing
    pub force_edit:       Option<String>,
    /// Number of calendar panels shown
    pub calendars:        u8,
}

impl Default for DateRangeConfig {
    fn default() -> Self {
        Self {
            format:           DEFAULT_FORMAT.to_owned(),
            linked_calendars: false,
            force_edit:       None,
            calendars:        DEFAULT_CALENDARS,
        }
    }
}

impl DateRangeConfig {
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_linked_calendars(mut self, linked: bool) -> Self {
        self.linked_calendars = linked;
        self
    }

    #[must_use]
    pub fn with_force_edit(mut self, endpoint: Option<Endpoint>) -> Self {
        self.force_edit = endpoint.map(|e| e.key().to_owned());
        self
    }

    #[must_use]
    pub fn with_calendars(mut self, calendars: u8) -> Self {
        self.calendars = calendars;
        self
    }

    /// The forced endpoint, if the configured name is one we know.
    /// Unknown names are logged and treated as no forcing.
    pub fn force_edit_endpoint(&self) -> Option<Endpoint> {
        let raw = self.force_edit.as_deref()?;
        match raw.parse::<Endpoint>() {
            Ok(endpoint) => Some(endpoint),
            Err(err) => {
                tracing::warn!(%err, "ignoring forceEdit, falling back to two-step selection");
                None
            },
        }
    }

    /// Linking only matters with two or more panels
    pub const fn linking_active(&self) -> bool {
        self.linked_calendars && self.calendars >= MIN_LINKED_CALENDARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    struct WarnCapture {
        warnings: Arc<Mutex<usize>>,
    }

    impl<S: Subscriber> Layer<S> for WarnCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                *self.warnings.lock().expect("warn count lock") += 1;
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let warnings = Arc::new(Mutex::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCapture {
            warnings: Arc::clone(&warnings),
        });
        tracing::subscriber::with_default(subscriber, f);
        let count = *warnings.lock().expect("warn count lock");
        count
    }

    #[test]
    fn test_unknown_force_edit_logs_warning() {
        let unknown = DateRangeConfig {
            force_edit: Some("middle".to_owned()),
            ..DateRangeConfig::default()
        };
        assert_eq!(count_warnings(|| assert_eq!(unknown.force_edit_endpoint(), None)), 1);

        let known = DateRangeConfig::default().with_force_edit(Some(Endpoint::Start));
        assert_eq!(count_warnings(|| assert_eq!(known.force_edit_endpoint(), Some(Endpoint::Start))), 0);
    }

    #[test]
    fn test_defaults() {
        let config = DateRangeConfig::default();
        assert_eq!(config.format, "DD/MM/YYYY");
        assert!(!config.linked_calendars);
        assert_eq!(config.force_edit, None);
        assert_eq!(config.calendars, 2);
        assert!(!config.linking_active());
        assert_eq!(config.force_edit_endpoint(), None);
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: DateRangeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DateRangeConfig::default());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "format": "YYYY-MM-DD",
            "linkedCalendars": true,
            "forceEdit": "startDate",
            "calendars": 3
        }"#;
        let config: DateRangeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.format, "YYYY-MM-DD");
        assert!(config.linking_active());
        assert_eq!(config.force_edit_endpoint(), Some(Endpoint::Start));
        assert_eq!(config.calendars, 3);
    }

    #[test]
    fn test_unknown_force_edit_is_ignored() {
        let config: DateRangeConfig = serde_json::from_str(r#"{ "forceEdit": "middle" }"#).unwrap();
        assert_eq!(config.force_edit.as_deref(), Some("middle"));
        assert_eq!(config.force_edit_endpoint(), None);
    }

    #[test]
    fn test_linking_needs_two_panels() {
        let config = DateRangeConfig::default()
            .with_linked_calendars(true)
            .with_calendars(1);
        assert!(!config.linking_active());
        assert!(config.with_calendars(2).linking_active());
    }

    #[test]
    fn test_builders() {
        let config = DateRangeConfig::default()
            .with_format("D MMM YYYY")
            .with_force_edit(Some(Endpoint::End));
        assert_eq!(config.format, "D MMM YYYY");
        assert_eq!(config.force_edit.as_deref(), Some("endDate"));
        assert_eq!(config.with_force_edit(None).force_edit_endpoint(), None);
    }

    #[test]
    fn test_serialize_round_trip_names() {
        let config = DateRangeConfig::default().with_linked_calendars(true);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["linkedCalendars"], true);
        assert_eq!(json["forceEdit"], serde_json::Value::Null);
    }
}
