//! Continuous and banded scales used to place the chart geometry.

use serde::{Deserialize, Serialize};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Maps a numeric domain onto a pixel range linearly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
  pub domain: [f64; 2],
  pub range: [f64; 2],
}

impl LinearScale {
  pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
    LinearScale { domain, range }
  }

  /// A zero-width domain maps everything to the middle of the range.
  pub fn apply(&self, value: f64) -> f64 {
    let [d0, d1] = self.domain;
    let [r0, r1] = self.range;
    let span = d1 - d0;
    let t = if span != 0.0 {
      (value - d0) / span
    } else if span.is_nan() {
      f64::NAN
    } else {
      0.5
    };

    r0 * (1.0 - t) + r1 * t
  }

  /// Human-friendly tick values, approximately `count` of them.
  pub fn ticks(&self, count: f64) -> Vec<f64> {
    TickSpec::new(self.domain[0], self.domain[1], count)
      .map(|spec| spec.values().collect())
      .unwrap_or_default()
  }
}

/// Integer bounds and increment describing a run of nice ticks.
///
/// A negative `inc` means the step is `1 / -inc`, which keeps fractional
/// steps exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpec {
  start: f64,
  i1: f64,
  i2: f64,
  inc: f64,
  reverse: bool,
}

impl TickSpec {
  pub fn new(start: f64, stop: f64, count: f64) -> Option<Self> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
      return None;
    }

    if start == stop {
      return Some(TickSpec {
        start,
        i1: 0.0,
        i2: 0.0,
        inc: 0.0,
        reverse: false,
      });
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = increment(lo, hi, count);
    if !(i2 >= i1) {
      return None;
    }

    Some(TickSpec {
      start,
      i1,
      i2,
      inc,
      reverse,
    })
  }

  pub fn len(&self) -> usize {
    if self.inc == 0.0 {
      return 1;
    }
    (self.i2 - self.i1) as usize + 1
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn value(&self, index: usize) -> f64 {
    if self.inc == 0.0 {
      return self.start;
    }

    let i = index as f64;
    let n = if self.reverse { self.i2 - i } else { self.i1 + i };
    if self.inc < 0.0 {
      n / -self.inc
    } else {
      n * self.inc
    }
  }

  pub fn values(self) -> impl Iterator<Item = f64> {
    (0..self.len()).map(move |index| self.value(index))
  }
}

fn increment(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
  let step = (stop - start) / count.max(0.0);
  let power = step.log10().floor();
  let error = step / 10f64.powf(power);
  let factor = if error >= E10 {
    10.0
  } else if error >= E5 {
    5.0
  } else if error >= E2 {
    2.0
  } else {
    1.0
  };

  let (mut i1, mut i2, inc);
  if power < 0.0 {
    let scaled = 10f64.powf(-power) / factor;
    i1 = round_half_up(start * scaled);
    i2 = round_half_up(stop * scaled);
    if i1 / scaled < start {
      i1 += 1.0;
    }
    if i2 / scaled > stop {
      i2 -= 1.0;
    }
    inc = -scaled;
  } else {
    let scaled = 10f64.powf(power) * factor;
    i1 = round_half_up(start / scaled);
    i2 = round_half_up(stop / scaled);
    if i1 * scaled < start {
      i1 += 1.0;
    }
    if i2 * scaled > stop {
      i2 -= 1.0;
    }
    inc = scaled;
  }

  if i2 < i1 && (0.5..2.0).contains(&count) {
    return increment(start, stop, count * 2.0);
  }

  (i1, i2, inc)
}

// Halves round towards positive infinity, also for negative numbers.
pub(crate) fn round_half_up(value: f64) -> f64 {
  (value + 0.5).floor()
}

/// Maps integer indices onto evenly spaced, padded bands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
  pub len: usize,
  pub range: [f64; 2],
  pub padding_inner: f64,
  pub padding_outer: f64,
  pub align: f64,
}

impl BandScale {
  pub fn new(len: usize, range: [f64; 2]) -> Self {
    BandScale {
      len,
      range,
      padding_inner: 0.0,
      padding_outer: 0.0,
      align: 0.5,
    }
  }

  /// Sets inner and outer padding together.
  pub fn padding(mut self, padding: f64) -> Self {
    self.padding_inner = padding.clamp(0.0, 1.0);
    self.padding_outer = padding;
    self
  }

  /// Distance between the starts of adjacent bands.
  pub fn step(&self) -> f64 {
    let n = self.len as f64;
    let [r0, r1] = self.range;
    (r1 - r0).abs() / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
  }

  pub fn bandwidth(&self) -> f64 {
    self.step() * (1.0 - self.padding_inner)
  }

  /// Gap between two adjacent bands.
  pub fn gap(&self) -> f64 {
    self.step() * self.padding_inner
  }

  pub fn offset(&self, index: usize) -> Option<f64> {
    if index >= self.len {
      return None;
    }

    let n = self.len as f64;
    let [r0, r1] = self.range;
    let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
    let step = self.step();
    let first = start + (stop - start - step * (n - self.padding_inner)) * self.align;
    let slot = if r1 < r0 { self.len - 1 - index } else { index };

    Some(first + step * slot as f64)
  }
}
