use crate::{
  aggregate, layout, render_rows, AggregationResult, DashboardOptions, Error, LayoutModel, Result,
  TableRow, WorkflowExecution,
};
use std::sync::Arc;

/// Everything the dashboard page renders for one execution record.
///
/// A view is computed once per record. When the record is fetched again,
/// build a new view; nothing is cached across records.
#[derive(Debug, Clone)]
pub struct DashboardView {
  raw: Arc<serde_json::Value>,
  execution: Arc<WorkflowExecution>,
  layout: LayoutModel,
  aggregation: AggregationResult,
}

impl DashboardView {
  pub fn new(raw: serde_json::Value, options: &DashboardOptions) -> Result<Self> {
    let execution = WorkflowExecution::from_value(raw.clone())?;

    Ok(DashboardView {
      layout: layout(&execution, options),
      aggregation: aggregate(&execution, options),
      raw: Arc::new(raw),
      execution: Arc::new(execution),
    })
  }

  pub fn from_json(json: &str, options: &DashboardOptions) -> Result<Self> {
    let raw: serde_json::Value = serde_json::from_str(json).map_err(Error::invalid_record)?;
    Self::new(raw, options)
  }

  /// Runs layout and aggregation on separate blocking tasks.
  pub async fn compute(raw: serde_json::Value, options: DashboardOptions) -> Result<Self> {
    let execution = Arc::new(WorkflowExecution::from_value(raw.clone())?);
    let options = Arc::new(options);

    let layout_task = {
      let execution = execution.clone();
      let options = options.clone();
      tokio::task::spawn_blocking(move || layout(&execution, &options))
    };
    let aggregate_task = {
      let execution = execution.clone();
      let options = options.clone();
      tokio::task::spawn_blocking(move || aggregate(&execution, &options))
    };

    let (layout, aggregation) = tokio::join!(layout_task, aggregate_task);
    let layout = layout.map_err(|err| {
      log::error!("Layout task failed: {}", err);
      Error::internal_runtime_error(err)
    })?;
    let aggregation = aggregation.map_err(|err| {
      log::error!("Aggregation task failed: {}", err);
      Error::internal_runtime_error(err)
    })?;

    Ok(DashboardView {
      raw: Arc::new(raw),
      execution,
      layout,
      aggregation,
    })
  }

  pub fn execution(&self) -> &WorkflowExecution {
    &self.execution
  }

  pub fn layout(&self) -> &LayoutModel {
    &self.layout
  }

  pub fn aggregation(&self) -> &AggregationResult {
    &self.aggregation
  }

  /// `"{workflowName} ({id}): {status}"` for the page header.
  pub fn title(&self, id: &str) -> String {
    format!(
      "{} ({}): {}",
      self.execution.workflow_name.as_deref().unwrap_or_default(),
      id,
      self.execution.status
    )
  }

  pub fn can_abort(&self) -> bool {
    self.execution.status.is_abortable()
  }

  pub fn show_failures(&self) -> bool {
    self.execution.status.is_failed()
  }

  pub fn summary_table(&self) -> Vec<TableRow> {
    self.aggregation.summary.table()
  }

  pub fn failures_table(&self) -> Vec<TableRow> {
    self.aggregation.failures_table()
  }

  pub fn labels_table(&self) -> Vec<TableRow> {
    render_rows(&self.execution.labels)
  }

  pub fn inputs_table(&self) -> Vec<TableRow> {
    render_rows(&self.execution.inputs)
  }

  pub fn outputs_table(&self) -> Vec<TableRow> {
    self.aggregation.outputs_table()
  }

  /// The record exactly as received, for the metadata download.
  pub fn export_json(&self) -> Result<String> {
    serde_json::to_string(self.raw.as_ref()).map_err(Error::serialize)
  }
}
