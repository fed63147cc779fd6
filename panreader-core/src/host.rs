//! The capability a host generator hands to its readers.

use crate::config::Settings;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

/// Host-side reader capability: settings plus a per-field metadata hook.
pub trait ReaderHost: Send + Sync {
    /// Read-only site settings
    fn settings(&self) -> &Settings;

    /// Canonicalize a metadata value for the given field name.
    fn process_metadata(&self, _key: &str, value: String) -> String {
        value
    }
}

/// Fields holding a date or datetime
const DATE_FIELDS: &[&str] = &["date", "modified"];

/// Fields holding a comma-separated list
const LIST_FIELDS: &[&str] = &["tags", "keywords", "authors"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%d %B %Y", "%B %d, %Y"];

/// Host used by the command-line front end.
#[derive(Debug, Clone, Default)]
pub struct SiteHost {
    settings: Settings,
}

impl SiteHost {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl ReaderHost for SiteHost {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn process_metadata(&self, key: &str, value: String) -> String {
        let field = key.to_lowercase();
        if DATE_FIELDS.contains(&field.as_str()) {
            canonical_date(&value).unwrap_or_else(|| {
                warn!("Unrecognized {} value {:?}; keeping it verbatim", key, value);
                value
            })
        } else if LIST_FIELDS.contains(&field.as_str()) {
            canonical_list(&value)
        } else {
            value
        }
    }
}

/// Normalize a date or datetime string.
///
/// Date-only values become `YYYY-MM-DD`, datetimes `YYYY-MM-DDTHH:MM:SS`,
/// and values carrying an offset are re-emitted as RFC 3339.
pub fn canonical_date(raw: &str) -> Option<String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.to_rfc3339());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Trim each comma-separated entry and drop empty ones
pub fn canonical_list(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
