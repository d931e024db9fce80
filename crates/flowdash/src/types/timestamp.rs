use chrono::TimeZone;
use serde::{Deserialize, Serialize};

pub type Time = chrono::DateTime<chrono::Utc>;

/// A point in time as it appears in execution metadata.
///
/// Metadata carries RFC 3339 strings, some producers send epoch milliseconds.
/// Anything else is kept verbatim so that a bad value degrades the fields
/// that need it instead of rejecting the whole record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
  Millis(f64),
  Text(String),
  Invalid(serde_json::Value),
}

impl Timestamp {
  pub fn parse(&self) -> Option<Time> {
    match self {
      Timestamp::Millis(ms) => {
        if !ms.is_finite() {
          return None;
        }
        chrono::Utc.timestamp_millis_opt(ms.round() as i64).single()
      }
      Timestamp::Text(text) => parse_text(text.trim()),
      Timestamp::Invalid(_) => None,
    }
  }

  /// Epoch milliseconds, the unit every scale in this crate works in.
  pub fn millis(&self) -> Option<f64> {
    match self {
      Timestamp::Millis(ms) if ms.is_finite() => Some(*ms),
      Timestamp::Millis(_) => None,
      _ => self.parse().map(|time| time.timestamp_millis() as f64),
    }
  }
}

impl From<Time> for Timestamp {
  fn from(time: Time) -> Self {
    Timestamp::Text(time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
  }
}

impl From<f64> for Timestamp {
  fn from(ms: f64) -> Self {
    Timestamp::Millis(ms)
  }
}

impl From<&str> for Timestamp {
  fn from(text: &str) -> Self {
    Timestamp::Text(text.to_string())
  }
}

/// RFC 3339 first. A date and time without an offset is local time, a bare
/// date is midnight UTC.
fn parse_text(text: &str) -> Option<Time> {
  if let Ok(time) = chrono::DateTime::parse_from_rfc3339(text) {
    return Some(time.with_timezone(&chrono::Utc));
  }

  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, format) {
      return chrono::Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|time| time.with_timezone(&chrono::Utc));
    }
  }

  chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| chrono::Utc.from_utc_datetime(&naive))
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an optional timestamp field, treating absence like a bad value.
pub fn parse_millis(timestamp: Option<&Timestamp>) -> Option<f64> {
  timestamp.and_then(Timestamp::millis)
}
