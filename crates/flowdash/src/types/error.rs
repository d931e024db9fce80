use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("Invalid workflow execution record: {0}")]
  InvalidRecord(String),

  #[error("Failed to serialize workflow execution record: {0}")]
  Serialize(String),

  #[error("Error while computing dashboard: {0}")]
  InternalRuntimeError(String),
}

impl Error {
  pub fn invalid_record<T: ToString>(message: T) -> Self {
    Self::InvalidRecord(message.to_string())
  }

  pub fn serialize<T: ToString>(message: T) -> Self {
    Self::Serialize(message.to_string())
  }

  pub fn internal_runtime_error<T: ToString>(message: T) -> Self {
    Self::InternalRuntimeError(message.to_string())
  }
}

// implement PartialEq for Error so that we can compare errors in tests
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
      (Self::Serialize(a), Self::Serialize(b)) => a == b,
      (Self::InternalRuntimeError(a), Self::InternalRuntimeError(b)) => a == b,
      _ => false,
    }
  }
}

/// Per-shard problem that prevents a resource total from being computed.
///
/// These never propagate out of the aggregator. Their `Display` text is what
/// ends up in the summary table in place of the number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "call")]
pub enum ResourceError {
  #[error("Missing start/end time for {0}")]
  MalformedTimestamp(String),

  #[error("Missing runtime attributes for {0}")]
  MissingRuntimeAttributes(String),

  #[error("Failed to get number of CPU for {0}")]
  UnparseableCpu(String),

  #[error("Failed to get memory in GB for {0}")]
  UnparseableMemory(String),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_eq() {
    assert_eq!(
      Error::invalid_record("hello"),
      Error::invalid_record("hello")
    );
    assert_eq!(Error::serialize("hello"), Error::serialize("hello"));
    assert_eq!(
      Error::internal_runtime_error("hello"),
      Error::internal_runtime_error("hello")
    );
  }

  #[test]
  fn test_ne() {
    assert_ne!(
      Error::invalid_record("hello"),
      Error::invalid_record("world")
    );
    assert_ne!(Error::serialize("hello"), Error::invalid_record("hello"));
    assert_ne!(
      Error::internal_runtime_error("hello"),
      Error::serialize("hello")
    );
  }

  #[test]
  fn test_resource_error_messages() {
    assert_eq!(
      ResourceError::MalformedTimestamp("align".to_string()).to_string(),
      "Missing start/end time for align"
    );
    assert_eq!(
      ResourceError::MissingRuntimeAttributes("align".to_string()).to_string(),
      "Missing runtime attributes for align"
    );
    assert_eq!(
      ResourceError::UnparseableCpu("align".to_string()).to_string(),
      "Failed to get number of CPU for align"
    );
    assert_eq!(
      ResourceError::UnparseableMemory("align".to_string()).to_string(),
      "Failed to get memory in GB for align"
    );
  }
}
