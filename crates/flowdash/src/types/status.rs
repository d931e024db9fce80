use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum WorkflowStatus {
  Submitted,
  OnHold,
  Running,
  Aborting,
  Aborted,
  Succeeded,
  Failed,
  Unknown(String),
}

impl WorkflowStatus {
  /// Only a running workflow offers the abort action.
  pub fn is_abortable(&self) -> bool {
    matches!(self, WorkflowStatus::Running)
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, WorkflowStatus::Failed)
  }
}

impl Default for WorkflowStatus {
  fn default() -> Self {
    WorkflowStatus::Unknown(String::new())
  }
}

impl std::fmt::Display for WorkflowStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let status = match self {
      WorkflowStatus::Submitted => "Submitted",
      WorkflowStatus::OnHold => "On Hold",
      WorkflowStatus::Running => "Running",
      WorkflowStatus::Aborting => "Aborting",
      WorkflowStatus::Aborted => "Aborted",
      WorkflowStatus::Succeeded => "Succeeded",
      WorkflowStatus::Failed => "Failed",
      WorkflowStatus::Unknown(s) => s.as_str(),
    };

    write!(f, "{}", status)
  }
}

impl From<String> for WorkflowStatus {
  fn from(s: String) -> Self {
    match s.as_str() {
      "Submitted" => WorkflowStatus::Submitted,
      "On Hold" => WorkflowStatus::OnHold,
      "Running" => WorkflowStatus::Running,
      "Aborting" => WorkflowStatus::Aborting,
      "Aborted" => WorkflowStatus::Aborted,
      "Succeeded" => WorkflowStatus::Succeeded,
      "Failed" => WorkflowStatus::Failed,
      _ => WorkflowStatus::Unknown(s),
    }
  }
}

impl From<WorkflowStatus> for String {
  fn from(status: WorkflowStatus) -> Self {
    status.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_abortable() {
    assert!(WorkflowStatus::Running.is_abortable());
    assert!(!WorkflowStatus::Aborting.is_abortable());
    assert!(!WorkflowStatus::Succeeded.is_abortable());
  }

  #[test]
  fn test_round_trip_strings() {
    for raw in ["Submitted", "On Hold", "Running", "Aborting", "Aborted", "Succeeded", "Failed"] {
      let status = WorkflowStatus::from(raw.to_string());
      assert!(!matches!(status, WorkflowStatus::Unknown(_)));
      assert_eq!(status.to_string(), raw);
    }

    let status = WorkflowStatus::from("Paused".to_string());
    assert_eq!(status, WorkflowStatus::Unknown("Paused".to_string()));
    assert_eq!(status.to_string(), "Paused");
  }

  #[test]
  fn test_serde() {
    let status: WorkflowStatus = serde_json::from_str(r#""On Hold""#).unwrap();
    assert_eq!(status, WorkflowStatus::OnHold);
    assert_eq!(serde_json::to_string(&status).unwrap(), r#""On Hold""#);
  }
}
