use crate::{
  format_timestamp, parse_millis, render_rows, time_string, DisplayZone, ResourceUsage, TableRow,
  WorkflowExecution,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WORKFLOW_LANGUAGE: &str = "Workflow Language";
pub const SUBMISSION: &str = "Submission";
pub const DURATION: &str = "Duration";
pub const WORKFLOW_ROOT: &str = "Workflow Root";
pub const BACKENDS: &str = "Backends";
pub const MACHINE_ZONES: &str = "Machine zones";
pub const MACHINE_TYPES: &str = "Machine types used";
pub const TOTAL_CPU_HOURS: &str = "Total CPU hours";
pub const TOTAL_MEMORY_HOURS: &str = "Total memory GB * hours";

const UNKNOWN_TIME: &str = "?";

/// Labeled summary fields in the order they were produced.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Summary(IndexMap<String, String>);

impl Summary {
  pub fn get(&self, label: &str) -> Option<&str> {
    self.0.get(label).map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Sorted table rows, without empty fields.
  pub fn table(&self) -> Vec<TableRow> {
    render_rows(&self.0)
  }

  fn insert(&mut self, label: &str, value: String) {
    self.0.insert(label.to_string(), value);
  }
}

/// Placement sets collected from every shard.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
  pub backends: BTreeSet<String>,
  pub zones: BTreeSet<String>,
  pub machine_types: BTreeSet<String>,
}

impl Placement {
  pub(crate) fn record(&mut self, shard: &crate::Shard) {
    self.backends.insert(
      shard
        .backend
        .clone()
        .filter(|backend| !backend.is_empty())
        .unwrap_or_else(|| "unknown".to_string()),
    );

    match &shard.jes {
      Some(jes) => {
        self.zones.insert(or_unknown(jes.zone.as_deref()));
        self.machine_types.insert(or_unknown(jes.machine_type.as_deref()));
      }
      None => {
        self.zones.insert(crate::PLACEHOLDER.to_string());
        self.machine_types.insert(crate::PLACEHOLDER.to_string());
      }
    }
  }
}

fn or_unknown(value: Option<&str>) -> String {
  match value {
    Some(value) if !value.is_empty() => value.to_string(),
    _ => "unknown".to_string(),
  }
}

fn join(set: &BTreeSet<String>) -> String {
  set.iter().cloned().collect::<Vec<_>>().join(", ")
}

pub fn workflow_language(execution: &WorkflowExecution) -> String {
  let language = execution.actual_workflow_language.clone().unwrap_or_default();
  match execution
    .actual_workflow_language_version
    .as_deref()
    .filter(|version| !version.is_empty())
  {
    Some(version) => format!("{} ({})", language, version),
    None => language,
  }
}

/// `start - end (elapsed)`, with `?` for times that do not parse.
pub fn duration(execution: &WorkflowExecution, zone: DisplayZone) -> String {
  let start = format_timestamp(execution.start.as_ref(), zone);
  let end = format_timestamp(execution.end.as_ref(), zone);

  let elapsed = match (
    parse_millis(execution.start.as_ref()),
    parse_millis(execution.end.as_ref()),
  ) {
    (Some(start), Some(end)) => format!(" ({})", time_string(end - start)),
    _ => String::new(),
  };

  format!(
    "{} - {}{}",
    start.as_deref().unwrap_or(UNKNOWN_TIME),
    end.as_deref().unwrap_or(UNKNOWN_TIME),
    elapsed
  )
}

pub(crate) fn build_summary(
  execution: &WorkflowExecution,
  placement: &Placement,
  usage: &ResourceUsage,
  zone: DisplayZone,
) -> Summary {
  let mut summary = Summary::default();

  summary.insert(WORKFLOW_LANGUAGE, workflow_language(execution));
  summary.insert(
    SUBMISSION,
    format_timestamp(execution.submission.as_ref(), zone).unwrap_or_else(|| UNKNOWN_TIME.to_string()),
  );
  summary.insert(DURATION, duration(execution, zone));
  summary.insert(
    WORKFLOW_ROOT,
    execution.workflow_root.clone().unwrap_or_default(),
  );
  summary.insert(BACKENDS, join(&placement.backends));
  summary.insert(MACHINE_ZONES, join(&placement.zones));
  summary.insert(MACHINE_TYPES, join(&placement.machine_types));
  summary.insert(TOTAL_CPU_HOURS, usage.cpu_hours.display());
  summary.insert(TOTAL_MEMORY_HOURS, usage.memory_gb_hours.display());

  summary
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{JesInfo, Shard, Timestamp};

  #[test]
  fn test_workflow_language() {
    let mut execution = WorkflowExecution {
      actual_workflow_language: Some("WDL".to_string()),
      ..Default::default()
    };
    assert_eq!(workflow_language(&execution), "WDL");

    execution.actual_workflow_language_version = Some("1.0".to_string());
    assert_eq!(workflow_language(&execution), "WDL (1.0)");
  }

  #[test]
  fn test_duration() {
    let mut execution = WorkflowExecution {
      start: Some(Timestamp::from("2021-01-01T10:00:00Z")),
      end: Some(Timestamp::from("2021-01-01T11:30:00Z")),
      ..Default::default()
    };
    assert_eq!(
      duration(&execution, DisplayZone::Utc),
      "2021-01-01 10:00:00 - 2021-01-01 11:30:00 (1.5 hr)"
    );

    execution.end = None;
    assert_eq!(
      duration(&execution, DisplayZone::Utc),
      "2021-01-01 10:00:00 - ?"
    );
  }

  #[test]
  fn test_placement_placeholders() {
    let mut placement = Placement::default();
    placement.record(&Shard::default());
    placement.record(&Shard {
      backend: Some("PAPIv2".to_string()),
      jes: Some(JesInfo {
        zone: Some("us-central1-b".to_string()),
        machine_type: None,
      }),
      ..Default::default()
    });

    assert_eq!(join(&placement.backends), "PAPIv2, unknown");
    assert_eq!(join(&placement.zones), "N/A, us-central1-b");
    assert_eq!(join(&placement.machine_types), "N/A, unknown");
  }

  #[test]
  fn test_summary_table_is_sorted() {
    let execution = WorkflowExecution {
      actual_workflow_language: Some("WDL".to_string()),
      workflow_root: Some("gs://bucket/root".to_string()),
      ..Default::default()
    };
    let summary = build_summary(
      &execution,
      &Placement::default(),
      &ResourceUsage::default(),
      DisplayZone::Utc,
    );

    assert_eq!(summary.len(), 9);
    assert_eq!(summary.get(TOTAL_CPU_HOURS), Some("0.00"));
    // empty placement sets drop out of the table
    let labels: Vec<String> = summary
      .table()
      .into_iter()
      .filter_map(|row| row.label)
      .collect();
    assert_eq!(
      labels,
      vec![
        DURATION,
        SUBMISSION,
        TOTAL_CPU_HOURS,
        TOTAL_MEMORY_HOURS,
        WORKFLOW_LANGUAGE,
        WORKFLOW_ROOT
      ]
    );
  }
}
