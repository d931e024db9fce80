//! Resource usage, failures and outputs summed over every shard.

mod digest;
mod resources;
mod summary;

pub use digest::*;
pub use resources::*;
pub use summary::*;

use crate::{render_rows, DashboardOptions, TableRow, WorkflowExecution};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
  pub summary: Summary,
  pub placement: Placement,
  pub resources: ResourceUsage,
  pub failures: FailureDigest,
  pub outputs: OutputsDigest,
}

impl AggregationResult {
  pub fn failures_table(&self) -> Vec<TableRow> {
    render_rows(&self.failures)
  }

  pub fn outputs_table(&self) -> Vec<TableRow> {
    render_rows(&self.outputs)
  }
}

/// Walks calls and shards in declaration order. Bad shard data only ever
/// degrades the affected summary field.
pub fn aggregate(execution: &WorkflowExecution, options: &DashboardOptions) -> AggregationResult {
  let mut placement = Placement::default();
  let mut resources = ResourceUsage::default();
  let mut failures = FailureDigest::new();
  let mut outputs = OutputsDigest::new();

  for call in execution.calls() {
    for shard in call.shards {
      placement.record(shard);
      resources.record(call.name, shard);
      record_failures(&mut failures, call.name, shard);
      record_outputs(&mut outputs, call.name, shard);
    }
  }

  let summary = build_summary(execution, &placement, &resources, options.display_zone);

  log::debug!(
    "Aggregated {} shards: {} failed calls, {} outputs, cpu {}, memory {}",
    execution.shard_count(),
    failures.len(),
    outputs.len(),
    resources.cpu_hours.display(),
    resources.memory_gb_hours.display()
  );

  AggregationResult {
    summary,
    placement,
    resources,
    failures,
    outputs,
  }
}
