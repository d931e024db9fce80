use crate::{DisplayZone, Timestamp};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Elapsed time in the largest unit that keeps the value at least one.
pub fn time_string(milliseconds: f64) -> String {
  let seconds = milliseconds / 1000.0;
  let minutes = seconds / 60.0;
  if minutes < 1.0 {
    return format!("{:.1} sec", seconds);
  }

  let hours = minutes / 60.0;
  if hours < 1.0 {
    return format!("{:.1} min", minutes);
  }

  format!("{:.1} hr", hours)
}

pub fn format_timestamp(timestamp: Option<&Timestamp>, zone: DisplayZone) -> Option<String> {
  timestamp
    .and_then(Timestamp::parse)
    .map(|time| zone.format(&time, DATETIME_FORMAT))
}
