//! Swimlane layout of calls, shards and their events.
//!
//! One row per shard, grouped by call in declaration order. Every call at an
//! odd position gets a shading band behind its rows. All positions are in
//! pixels relative to the plot area, whose own offset is given by
//! [`PlotArea`].

use crate::{
  parse_millis, AxisTick, BandScale, DashboardOptions, LinearScale, TimeAxis, WorkflowExecution,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlotArea {
  pub width: f64,
  pub height: f64,
  pub margin_left: f64,
  pub margin_top: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRect {
  /// Position of the event within its shard's event list.
  pub index: usize,
  pub x_offset: f64,
  pub width: f64,
  /// Input for the color ramp, in `[0, 1]`.
  pub color_fraction: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Row {
  pub call_name: String,
  pub shard_index: usize,
  pub row_index: usize,
  pub label: String,
  pub is_alternate_group: bool,
  pub y_offset: f64,
  pub bandwidth: f64,
  pub events: Vec<EventRect>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShadingBand {
  pub call_name: String,
  pub y_offset: f64,
  pub height: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutModel {
  pub width: f64,
  pub height: f64,
  pub label_width: f64,
  pub plot: PlotArea,
  pub time_scale: LinearScale,
  pub row_scale: BandScale,
  pub ticks: Vec<AxisTick>,
  pub bands: Vec<ShadingBand>,
  pub rows: Vec<Row>,
  /// Running shard total through each call, in declaration order.
  pub cum_shard_count: Vec<usize>,
  pub total_rows: usize,
}

impl LayoutModel {
  /// Rows belonging to one call, in shard order.
  pub fn call_rows<'a>(&'a self, call_name: &'a str) -> impl Iterator<Item = &'a Row> {
    self.rows.iter().filter(move |row| row.call_name == call_name)
  }
}

/// `index / (count - 1)`, or `0` when there is at most one event.
pub fn color_fraction(index: usize, count: usize) -> f64 {
  if count <= 1 {
    return 0.0;
  }
  index as f64 / (count - 1) as f64
}

pub fn cumulative_shard_counts(execution: &WorkflowExecution) -> Vec<usize> {
  execution
    .calls()
    .scan(0, |total, call| {
      *total += call.shards.len();
      Some(*total)
    })
    .collect()
}

/// Space for the longest call name plus the shard suffix.
pub fn label_width(execution: &WorkflowExecution, options: &DashboardOptions) -> f64 {
  let longest = execution
    .calls()
    .map(|call| call.name.chars().count())
    .max()
    .unwrap_or(0);

  (longest + options.label_padding_chars) as f64 * options.char_width
}

pub fn layout(execution: &WorkflowExecution, options: &DashboardOptions) -> LayoutModel {
  let cum_shard_count = cumulative_shard_counts(execution);
  let total_rows = cum_shard_count.last().copied().unwrap_or(0);

  let label_width = label_width(execution, options);
  let margin = options.axis_margin;
  let height = total_rows as f64 * options.row_height + margin * 2.0;
  let plot = PlotArea {
    width: (options.width - margin - label_width - margin).max(0.0),
    height: height - margin * 2.0,
    margin_left: margin + label_width,
    margin_top: margin,
  };

  let domain = time_domain(execution);
  let axis = TimeAxis::new(domain, [0.0, plot.width])
    .pixels_per_tick(options.pixels_per_tick)
    .zone(options.display_zone);
  let time_scale = *axis.scale();
  let row_scale = BandScale::new(total_rows, [0.0, plot.height]).padding(options.band_padding);

  let mut bands = Vec::new();
  let mut rows = Vec::with_capacity(total_rows);
  let mut first_row = 0;

  for (position, call) in execution.calls().enumerate() {
    let is_alternate_group = position % 2 == 1;
    let shard_count = call.shards.len();

    if is_alternate_group && shard_count > 0 {
      if let Some(top) = row_scale.offset(first_row) {
        bands.push(ShadingBand {
          call_name: call.name.to_string(),
          y_offset: top - row_scale.gap() / 2.0,
          height: row_scale.step() * shard_count as f64,
        });
      }
    }

    for (shard_index, shard) in call.shards.iter().enumerate() {
      let row_index = first_row + shard_index;
      let label = if shard_count > 1 {
        format!("{}.{}", call.name, shard_index)
      } else {
        call.name.to_string()
      };

      let event_count = shard.events.len();
      let events = shard
        .events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| {
          let Some((start, end)) = event.interval() else {
            log::warn!(
              "Skipping event {} of {}: unparseable start/end time",
              index,
              label
            );
            return None;
          };

          let x_offset = time_scale.apply(start);
          Some(EventRect {
            index,
            x_offset,
            width: time_scale.apply(end) - x_offset,
            color_fraction: color_fraction(index, event_count),
          })
        })
        .collect();

      rows.push(Row {
        call_name: call.name.to_string(),
        shard_index,
        row_index,
        label,
        is_alternate_group,
        y_offset: row_scale.offset(row_index).unwrap_or_default(),
        bandwidth: row_scale.bandwidth(),
        events,
      });
    }

    first_row += shard_count;
  }

  let ticks: Vec<AxisTick> = axis.ticks().collect();

  log::debug!(
    "Laid out {} calls into {} rows, {} bands and {} ticks",
    cum_shard_count.len(),
    total_rows,
    bands.len(),
    ticks.len()
  );

  LayoutModel {
    width: options.width,
    height,
    label_width,
    plot,
    time_scale,
    row_scale,
    ticks,
    bands,
    rows,
    cum_shard_count,
    total_rows,
  }
}

/// The execution's own start and end, or the span of its parseable
/// shard and event times when those are missing.
fn time_domain(execution: &WorkflowExecution) -> [f64; 2] {
  let mut earliest: Option<f64> = None;
  let mut latest: Option<f64> = None;
  let mut observe = |start: Option<f64>, end: Option<f64>| {
    if let Some(start) = start {
      earliest = Some(earliest.map_or(start, |e| e.min(start)));
    }
    if let Some(end) = end {
      latest = Some(latest.map_or(end, |l| l.max(end)));
    }
  };

  for call in execution.calls() {
    for shard in call.shards {
      observe(
        parse_millis(shard.start.as_ref()),
        parse_millis(shard.end.as_ref()),
      );
      for event in &shard.events {
        observe(
          parse_millis(event.start.as_ref()),
          parse_millis(event.end.as_ref()),
        );
      }
    }
  }

  let start = parse_millis(execution.start.as_ref()).or(earliest);
  let end = parse_millis(execution.end.as_ref()).or(latest);

  match (start, end) {
    (Some(start), Some(end)) => [start, end],
    (Some(time), None) | (None, Some(time)) => [time, time],
    (None, None) => [0.0, 0.0],
  }
}
