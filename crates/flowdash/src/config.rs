use crate::Time;
use serde::{Deserialize, Serialize};

/// Zone used to render tick labels and datetimes in the summary.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayZone {
  #[default]
  Local,
  Utc,
}

impl DisplayZone {
  pub fn format(&self, time: &Time, fmt: &str) -> String {
    match self {
      DisplayZone::Local => time.with_timezone(&chrono::Local).format(fmt).to_string(),
      DisplayZone::Utc => time.format(fmt).to_string(),
    }
  }
}

/// Dimensions and presentation constants shared by both pipelines.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardOptions {
  /// Total chart width in pixels.
  pub width: f64,
  pub pixels_per_tick: f64,
  pub row_height: f64,
  /// Space reserved on each side for the axes.
  pub axis_margin: f64,
  pub char_width: f64,
  /// Extra characters reserved after the longest call name for `.N`.
  pub label_padding_chars: usize,
  pub band_padding: f64,
  pub display_zone: DisplayZone,
}

impl Default for DashboardOptions {
  fn default() -> Self {
    DashboardOptions {
      width: 1000.0,
      pixels_per_tick: 50.0,
      row_height: 25.0,
      axis_margin: 30.0,
      char_width: 9.0,
      label_padding_chars: 2,
      band_padding: 0.5,
      display_zone: DisplayZone::Local,
    }
  }
}

impl DashboardOptions {
  pub fn builder() -> DashboardOptionsBuilder {
    DashboardOptionsBuilder::new()
  }
}

pub struct DashboardOptionsBuilder {
  options: DashboardOptions,
}

impl DashboardOptionsBuilder {
  pub fn new() -> Self {
    DashboardOptionsBuilder {
      options: DashboardOptions::default(),
    }
  }

  pub fn width(mut self, width: f64) -> Self {
    self.options.width = width;
    self
  }

  pub fn pixels_per_tick(mut self, pixels_per_tick: f64) -> Self {
    self.options.pixels_per_tick = pixels_per_tick;
    self
  }

  pub fn row_height(mut self, row_height: f64) -> Self {
    self.options.row_height = row_height;
    self
  }

  pub fn axis_margin(mut self, axis_margin: f64) -> Self {
    self.options.axis_margin = axis_margin;
    self
  }

  pub fn char_width(mut self, char_width: f64) -> Self {
    self.options.char_width = char_width;
    self
  }

  pub fn label_padding_chars(mut self, chars: usize) -> Self {
    self.options.label_padding_chars = chars;
    self
  }

  pub fn band_padding(mut self, padding: f64) -> Self {
    self.options.band_padding = padding;
    self
  }

  pub fn display_zone(mut self, zone: DisplayZone) -> Self {
    self.options.display_zone = zone;
    self
  }

  pub fn build(self) -> DashboardOptions {
    let mut options = self.options;
    if !(0.0..=1.0).contains(&options.band_padding) {
      log::warn!(
        "Band padding {} is outside [0, 1], clamping",
        options.band_padding
      );
      options.band_padding = options.band_padding.clamp(0.0, 1.0);
    }
    if options.pixels_per_tick <= 0.0 {
      log::warn!(
        "Pixels per tick must be positive, got {}; using the default",
        options.pixels_per_tick
      );
      options.pixels_per_tick = DashboardOptions::default().pixels_per_tick;
    }
    options
  }
}

impl Default for DashboardOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_defaults() {
    let options = DashboardOptions::default();
    assert_eq!(options.width, 1000.0);
    assert_eq!(options.pixels_per_tick, 50.0);
    assert_eq!(options.row_height, 25.0);
    assert_eq!(options.axis_margin, 30.0);
    assert_eq!(options.char_width, 9.0);
    assert_eq!(options.label_padding_chars, 2);
    assert_eq!(options.band_padding, 0.5);
    assert_eq!(DashboardOptions::builder().build(), options);
  }

  #[test]
  fn test_builder() {
    let options = DashboardOptions::builder()
      .width(640.0)
      .row_height(20.0)
      .display_zone(DisplayZone::Utc)
      .band_padding(1.5)
      .pixels_per_tick(0.0)
      .build();

    assert_eq!(options.width, 640.0);
    assert_eq!(options.row_height, 20.0);
    assert_eq!(options.display_zone, DisplayZone::Utc);
    assert_eq!(options.band_padding, 1.0);
    assert_eq!(options.pixels_per_tick, 50.0);
  }

  #[test]
  fn test_deserialize_partial() {
    let options: DashboardOptions =
      serde_json::from_str(r#"{ "width": 1200, "displayZone": "utc" }"#).unwrap();
    assert_eq!(options.width, 1200.0);
    assert_eq!(options.display_zone, DisplayZone::Utc);
    assert_eq!(options.row_height, 25.0);
  }

  #[test]
  fn test_format_utc() {
    let time = chrono::Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
    assert_eq!(DisplayZone::Utc.format(&time, "%H:%M"), "05:06");
  }
}
