use serde::{Deserialize, Serialize};

/// A runtime attribute value. Metadata usually reports `"2"` or `"7.5 GB"`
/// as strings, but bare numbers show up too.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
  Number(f64),
  String(String),
  Other(serde_json::Value),
}

impl AttributeValue {
  pub fn as_number(&self) -> Option<f64> {
    match self {
      AttributeValue::Number(n) if n.is_finite() => Some(*n),
      AttributeValue::String(s) => parse_number(s),
      _ => None,
    }
  }

  /// Memory size in GB. Only a literal `" GB"` suffix is stripped, so
  /// `"16GB"` is rejected.
  pub fn as_gigabytes(&self) -> Option<f64> {
    match self {
      AttributeValue::String(s) => parse_number(s.strip_suffix(" GB").unwrap_or(s)),
      other => other.as_number(),
    }
  }
}

fn parse_number(text: &str) -> Option<f64> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }

  text.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl std::fmt::Display for AttributeValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AttributeValue::Number(n) => write!(f, "{}", n),
      AttributeValue::String(s) => write!(f, "{}", s),
      AttributeValue::Other(v) => write!(f, "{}", v),
    }
  }
}

impl From<f64> for AttributeValue {
  fn from(n: f64) -> Self {
    AttributeValue::Number(n)
  }
}

impl From<&str> for AttributeValue {
  fn from(s: &str) -> Self {
    AttributeValue::String(s.to_string())
  }
}

impl From<String> for AttributeValue {
  fn from(s: String) -> Self {
    AttributeValue::String(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_as_number() {
    assert_eq!(AttributeValue::from(4.0).as_number(), Some(4.0));
    assert_eq!(AttributeValue::from("2").as_number(), Some(2.0));
    assert_eq!(AttributeValue::from(" 1.5 ").as_number(), Some(1.5));
    assert_eq!(AttributeValue::from("two").as_number(), None);
    assert_eq!(AttributeValue::from("").as_number(), None);
    assert_eq!(AttributeValue::from("NaN").as_number(), None);
    assert_eq!(
      AttributeValue::Other(serde_json::json!(true)).as_number(),
      None
    );
  }

  #[test]
  fn test_as_gigabytes() {
    assert_eq!(AttributeValue::from("16 GB").as_gigabytes(), Some(16.0));
    assert_eq!(AttributeValue::from("7.5 GB").as_gigabytes(), Some(7.5));
    assert_eq!(AttributeValue::from("16").as_gigabytes(), Some(16.0));
    assert_eq!(AttributeValue::from(16.0).as_gigabytes(), Some(16.0));
    assert_eq!(AttributeValue::from("16GB").as_gigabytes(), None);
    assert_eq!(AttributeValue::from("16 MB").as_gigabytes(), None);
  }

  #[test]
  fn test_to_string() {
    assert_eq!(AttributeValue::from(1.0).to_string(), "1");
    assert_eq!(AttributeValue::from("3 GB").to_string(), "3 GB");
  }

  #[test]
  fn test_deserialize() {
    let values: Vec<AttributeValue> = serde_json::from_str(r#"[1, "2 GB", false]"#).unwrap();
    assert_eq!(values[0], AttributeValue::Number(1.0));
    assert_eq!(values[1], AttributeValue::String("2 GB".to_string()));
    assert_eq!(values[2], AttributeValue::Other(serde_json::json!(false)));
  }
}
