use crate::{CallName, Shard};
use indexmap::IndexMap;

/// Failure messages per call, calls in first-failure order.
pub type FailureDigest = IndexMap<CallName, Vec<String>>;

/// Output values per `"<call>.<output>"`, one entry per shard in shard order.
pub type OutputsDigest = IndexMap<String, Vec<serde_json::Value>>;

pub(crate) fn record_failures(digest: &mut FailureDigest, call_name: &str, shard: &Shard) {
  for message in shard.failure_messages() {
    digest
      .entry(call_name.to_string())
      .or_default()
      .push(message.to_string());
  }
}

/// Single-shard calls still produce one-element lists.
pub(crate) fn record_outputs(digest: &mut OutputsDigest, call_name: &str, shard: &Shard) {
  let Some(outputs) = &shard.outputs else {
    return;
  };

  for (key, value) in outputs {
    digest
      .entry(format!("{}.{}", call_name, key))
      .or_default()
      .push(value.clone());
  }
}
