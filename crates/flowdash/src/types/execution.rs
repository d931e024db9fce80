use crate::{parse_millis, AttributeValue, Error, Result, Timestamp, WorkflowStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

pub type CallName = String;

/// Execution metadata for one workflow run.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
  pub id: Option<String>,
  pub workflow_name: Option<String>,
  #[serde(default)]
  pub status: WorkflowStatus,
  pub submission: Option<Timestamp>,
  pub start: Option<Timestamp>,
  pub end: Option<Timestamp>,
  pub workflow_root: Option<String>,
  pub actual_workflow_language: Option<String>,
  pub actual_workflow_language_version: Option<String>,
  #[serde(default)]
  pub labels: IndexMap<String, serde_json::Value>,
  #[serde(default)]
  pub inputs: IndexMap<String, serde_json::Value>,
  /// Keeps the declaration order of the source object.
  #[serde(default)]
  pub calls: IndexMap<CallName, CallEntry>,
}

/// A call is reported either as a single record or as one record per shard.
/// Anything else is kept verbatim and contributes no shards.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum CallEntry {
  Shards(Vec<Shard>),
  Single(Shard),
  Invalid(serde_json::Value),
}

/// One attempt of a call. A field of the wrong JSON type reads as absent, so
/// a bad value only degrades what is computed from that field.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Shard {
  pub start: Option<Timestamp>,
  pub end: Option<Timestamp>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub backend: Option<String>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub runtime_attributes: Option<RuntimeAttributes>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub jes: Option<JesInfo>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub failures: Option<Vec<Failure>>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub outputs: Option<IndexMap<String, serde_json::Value>>,
  #[serde(default, alias = "executionEvents")]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub events: Vec<Event>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeAttributes {
  pub cpu: Option<AttributeValue>,
  pub cpu_min: Option<AttributeValue>,
  pub memory: Option<AttributeValue>,
  pub memory_min: Option<AttributeValue>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JesInfo {
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub zone: Option<String>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub machine_type: Option<String>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub message: Option<String>,
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub caused_by: Vec<Failure>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Event {
  #[serde(default)]
  #[serde_as(deserialize_as = "DefaultOnError")]
  pub description: Option<String>,
  #[serde(alias = "startTime")]
  pub start: Option<Timestamp>,
  #[serde(alias = "endTime")]
  pub end: Option<Timestamp>,
}

/// A call after normalization: its name and a uniform shard slice.
#[derive(Debug, Clone, Copy)]
pub struct CallShards<'a> {
  pub name: &'a str,
  pub shards: &'a [Shard],
}

impl WorkflowExecution {
  pub fn from_json(json: &str) -> Result<Self> {
    serde_json::from_str(json).map_err(Error::invalid_record)
  }

  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    serde_json::from_value(value).map_err(Error::invalid_record)
  }

  /// Calls in declaration order, each normalized to a shard slice.
  pub fn calls(&self) -> impl Iterator<Item = CallShards<'_>> {
    self.calls.iter().map(|(name, entry)| CallShards {
      name: name.as_str(),
      shards: entry.shards(),
    })
  }

  pub fn shard_count(&self) -> usize {
    self.calls().map(|call| call.shards.len()).sum()
  }
}

impl TryFrom<&str> for WorkflowExecution {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self> {
    Self::from_json(value)
  }
}

impl CallEntry {
  pub fn shards(&self) -> &[Shard] {
    match self {
      CallEntry::Shards(shards) => shards,
      CallEntry::Single(shard) => std::slice::from_ref(shard),
      CallEntry::Invalid(_) => &[],
    }
  }
}

impl From<Vec<Shard>> for CallEntry {
  fn from(shards: Vec<Shard>) -> Self {
    CallEntry::Shards(shards)
  }
}

impl From<Shard> for CallEntry {
  fn from(shard: Shard) -> Self {
    CallEntry::Single(shard)
  }
}

impl Shard {
  /// `(start, end)` in epoch milliseconds when both parse.
  pub fn interval(&self) -> Option<(f64, f64)> {
    Some((
      parse_millis(self.start.as_ref())?,
      parse_millis(self.end.as_ref())?,
    ))
  }

  pub fn failure_messages(&self) -> impl Iterator<Item = &str> {
    self
      .failures
      .iter()
      .flatten()
      .filter_map(|failure| failure.message.as_deref())
      .filter(|message| !message.is_empty())
  }
}

impl Event {
  pub fn interval(&self) -> Option<(f64, f64)> {
    Some((
      parse_millis(self.start.as_ref())?,
      parse_millis(self.end.as_ref())?,
    ))
  }
}
