use crate::{scale::round_half_up, ResourceError, Shard};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Running total of one resource, or the reasons it cannot be computed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResourceTotal {
  pub total: f64,
  pub errors: Vec<ResourceError>,
}

impl ResourceTotal {
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// The error messages joined with `", "`, or the total to two decimals
  /// with ties rounded up.
  pub fn display(&self) -> String {
    if self.has_errors() {
      return self
        .errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    }

    format!("{:.2}", round_half_up(self.total * 100.0) / 100.0)
  }
}

/// CPU-hours and memory-GB-hours across every shard of an execution.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
  pub cpu_hours: ResourceTotal,
  pub memory_gb_hours: ResourceTotal,
}

impl ResourceUsage {
  /// Accumulation stops only once both resources have recorded an error.
  /// A resource with errors keeps collecting more of them until then.
  pub fn is_settled(&self) -> bool {
    self.cpu_hours.has_errors() && self.memory_gb_hours.has_errors()
  }

  pub fn record(&mut self, call_name: &str, shard: &Shard) {
    if self.is_settled() {
      log::trace!("Skipping resources of {}: both totals already failed", call_name);
      return;
    }

    let Some((start, end)) = shard.interval() else {
      log::warn!("Shard of {} has no usable start/end time", call_name);
      self.fail_both(ResourceError::MalformedTimestamp(call_name.to_string()));
      return;
    };

    let Some(attributes) = &shard.runtime_attributes else {
      log::warn!("Shard of {} has no runtime attributes", call_name);
      self.fail_both(ResourceError::MissingRuntimeAttributes(
        call_name.to_string(),
      ));
      return;
    };

    let hours = (end - start) / MILLIS_PER_HOUR;

    let cpu = attributes
      .cpu
      .as_ref()
      .or(attributes.cpu_min.as_ref())
      .and_then(|value| value.as_number());
    match cpu {
      Some(cpu) => self.cpu_hours.total += cpu * hours,
      None => {
        log::warn!("Shard of {} has no numeric CPU count", call_name);
        self
          .cpu_hours
          .errors
          .push(ResourceError::UnparseableCpu(call_name.to_string()));
      }
    }

    let memory = attributes
      .memory
      .as_ref()
      .or(attributes.memory_min.as_ref())
      .and_then(|value| value.as_gigabytes());
    match memory {
      Some(memory) => self.memory_gb_hours.total += memory * hours,
      None => {
        log::warn!("Shard of {} has no memory size in GB", call_name);
        self
          .memory_gb_hours
          .errors
          .push(ResourceError::UnparseableMemory(call_name.to_string()));
      }
    }
  }

  fn fail_both(&mut self, error: ResourceError) {
    self.cpu_hours.errors.push(error.clone());
    self.memory_gb_hours.errors.push(error);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{AttributeValue, RuntimeAttributes, Timestamp};

  fn shard(hours: f64, cpu: Option<&str>, memory: Option<&str>) -> Shard {
    Shard {
      start: Some(Timestamp::from(0.0)),
      end: Some(Timestamp::from(hours * MILLIS_PER_HOUR)),
      runtime_attributes: Some(RuntimeAttributes {
        cpu: cpu.map(AttributeValue::from),
        memory: memory.map(AttributeValue::from),
        ..Default::default()
      }),
      ..Default::default()
    }
  }

  #[test]
  fn test_accumulates() {
    let mut usage = ResourceUsage::default();
    usage.record("a", &shard(2.0, Some("4"), Some("16 GB")));
    usage.record("b", &shard(0.5, Some("2"), Some("3.75 GB")));

    assert_eq!(usage.cpu_hours.total, 9.0);
    assert_eq!(usage.memory_gb_hours.total, 33.875);
    assert_eq!(usage.cpu_hours.display(), "9.00");
    assert_eq!(usage.memory_gb_hours.display(), "33.88");
  }

  #[test]
  fn test_display_rounds_ties_up() {
    let total = |total: f64| ResourceTotal {
      total,
      errors: vec![],
    };

    assert_eq!(total(0.125).display(), "0.13");
    assert_eq!(total(2.5).display(), "2.50");
    assert_eq!(total(0.0).display(), "0.00");
  }

  #[test]
  fn test_min_fallbacks() {
    let mut usage = ResourceUsage::default();
    let mut s = shard(1.0, None, None);
    if let Some(attributes) = s.runtime_attributes.as_mut() {
      attributes.cpu_min = Some(AttributeValue::from(3.0));
      attributes.memory_min = Some(AttributeValue::from("2 GB"));
    }
    usage.record("a", &s);

    assert_eq!(usage.cpu_hours.display(), "3.00");
    assert_eq!(usage.memory_gb_hours.display(), "2.00");
  }

  #[test]
  fn test_memory_suffix_must_have_space() {
    let mut usage = ResourceUsage::default();
    usage.record("spaced", &shard(1.0, Some("1"), Some("16 GB")));
    usage.record("tight", &shard(1.0, Some("1"), Some("16GB")));

    assert_eq!(usage.memory_gb_hours.total, 16.0);
    assert_eq!(
      usage.memory_gb_hours.errors,
      vec![ResourceError::UnparseableMemory("tight".to_string())]
    );
    assert_eq!(usage.memory_gb_hours.display(), "Failed to get memory in GB for tight");
    assert_eq!(usage.cpu_hours.display(), "2.00");
  }

  #[test]
  fn test_missing_time_and_attributes_fail_both() {
    let mut usage = ResourceUsage::default();
    usage.record("no_time", &Shard::default());

    assert!(usage.is_settled());
    assert_eq!(
      usage.cpu_hours.display(),
      "Missing start/end time for no_time"
    );

    let mut usage = ResourceUsage::default();
    let mut s = shard(1.0, None, None);
    s.runtime_attributes = None;
    usage.record("no_attrs", &s);

    assert_eq!(
      usage.memory_gb_hours.display(),
      "Missing runtime attributes for no_attrs"
    );
  }

  #[test]
  fn test_short_circuit_needs_both_errors() {
    let mut usage = ResourceUsage::default();
    usage.record("cpu_broken", &shard(1.0, Some("many"), Some("4 GB")));
    assert!(!usage.is_settled());

    usage.record("fine", &shard(1.0, Some("2"), Some("8 GB")));
    assert_eq!(usage.memory_gb_hours.total, 12.0);
    assert_eq!(usage.cpu_hours.errors.len(), 1);

    // a second CPU failure is still recorded while memory is healthy
    usage.record("cpu_broken_again", &shard(1.0, None, Some("1 GB")));
    assert_eq!(usage.cpu_hours.errors.len(), 2);
    assert_eq!(usage.memory_gb_hours.total, 13.0);

    usage.record("mem_broken", &shard(1.0, Some("1"), Some("lots")));
    assert!(usage.is_settled());
    assert_eq!(usage.cpu_hours.total, 3.0);

    let before = usage.clone();
    usage.record("ignored", &Shard::default());
    assert_eq!(usage, before);
  }
}
