use crate::{DisplayZone, LinearScale, TickSpec};
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PIXELS_PER_TICK: f64 = 50.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
  /// Epoch milliseconds.
  pub value: f64,
  pub x_offset: f64,
  pub label: String,
}

/// Horizontal time axis: a linear scale plus nice, labeled ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
  scale: LinearScale,
  pixels_per_tick: f64,
  zone: DisplayZone,
}

impl TimeAxis {
  pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
    TimeAxis {
      scale: LinearScale::new(domain, range),
      pixels_per_tick: DEFAULT_PIXELS_PER_TICK,
      zone: DisplayZone::Local,
    }
  }

  pub fn pixels_per_tick(mut self, pixels_per_tick: f64) -> Self {
    self.pixels_per_tick = pixels_per_tick;
    self
  }

  pub fn zone(mut self, zone: DisplayZone) -> Self {
    self.zone = zone;
    self
  }

  pub fn scale(&self) -> &LinearScale {
    &self.scale
  }

  /// One tick per `pixels_per_tick` of range, never fewer than one.
  pub fn tick_count(&self) -> usize {
    let [r0, r1] = self.scale.range;
    let target = ((r1 - r0) / self.pixels_per_tick).floor();
    if target.is_finite() && target > 1.0 {
      target as usize
    } else {
      1
    }
  }

  /// Ticks are recomputed on every call.
  pub fn ticks(&self) -> Ticks {
    let [d0, d1] = self.scale.domain;
    Ticks {
      spec: TickSpec::new(d0, d1, self.tick_count() as f64),
      index: 0,
      scale: self.scale,
      zone: self.zone,
    }
  }
}

pub struct Ticks {
  spec: Option<TickSpec>,
  index: usize,
  scale: LinearScale,
  zone: DisplayZone,
}

impl Iterator for Ticks {
  type Item = AxisTick;

  fn next(&mut self) -> Option<Self::Item> {
    let spec = self.spec.as_ref()?;
    if self.index >= spec.len() {
      return None;
    }

    let value = spec.value(self.index);
    self.index += 1;

    Some(AxisTick {
      value,
      x_offset: self.scale.apply(value),
      label: tick_label(value, self.zone),
    })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self
      .spec
      .as_ref()
      .map_or(0, |spec| spec.len().saturating_sub(self.index));
    (remaining, Some(remaining))
  }
}

impl ExactSizeIterator for Ticks {}

/// Hour and minute of an epoch-millisecond value.
pub fn tick_label(value: f64, zone: DisplayZone) -> String {
  chrono::Utc
    .timestamp_millis_opt(value.round() as i64)
    .single()
    .map(|time| zone.format(&time, "%H:%M"))
    .unwrap_or_default()
}
