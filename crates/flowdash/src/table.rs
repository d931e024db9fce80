//! Flattening of key-value maps into table rows.
//!
//! Every table in the dashboard goes through [`normalize`]: empty values are
//! dropped, keys are sorted, and list values are spread over several rows
//! with the key shown only on the first one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER: &str = "N/A";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
  /// Set on the first row of each key only.
  pub label: Option<String>,
  pub value: String,
  /// Number of rows the label spans.
  pub span: usize,
}

impl TableRow {
  pub fn placeholder() -> Self {
    TableRow {
      label: None,
      value: PLACEHOLDER.to_string(),
      span: 1,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cells {
  Empty,
  Scalar(String),
  List(Vec<String>),
}

/// A value that can be shown in a key-value table.
pub trait TableValue {
  fn cells(&self) -> Cells;
}

impl TableValue for serde_json::Value {
  fn cells(&self) -> Cells {
    use serde_json::Value;

    match self {
      Value::Null => Cells::Empty,
      Value::String(s) if s.is_empty() => Cells::Empty,
      Value::Array(items) if items.is_empty() => Cells::Empty,
      Value::Object(fields) if fields.is_empty() => Cells::Empty,
      Value::Array(items) => Cells::List(items.iter().map(cell_text).collect()),
      other => Cells::Scalar(cell_text(other)),
    }
  }
}

impl TableValue for String {
  fn cells(&self) -> Cells {
    if self.is_empty() {
      Cells::Empty
    } else {
      Cells::Scalar(self.clone())
    }
  }
}

impl<T: TableValue> TableValue for Vec<T> {
  fn cells(&self) -> Cells {
    let items: Vec<String> = self
      .iter()
      .map(|item| match item.cells() {
        Cells::Empty => String::new(),
        Cells::Scalar(text) => text,
        Cells::List(texts) => texts.join(", "),
      })
      .collect();

    if items.is_empty() {
      Cells::Empty
    } else {
      Cells::List(items)
    }
  }
}

fn cell_text(value: &serde_json::Value) -> String {
  match value {
    serde_json::Value::String(s) => s.clone(),
    serde_json::Value::Null => String::new(),
    other => other.to_string(),
  }
}

/// Sorted, filtered and flattened rows for a key-value map.
pub fn normalize<V: TableValue>(map: &IndexMap<String, V>) -> Vec<TableRow> {
  let mut entries: Vec<(&String, Cells)> = map
    .iter()
    .map(|(key, value)| (key, value.cells()))
    .filter(|(_, cells)| *cells != Cells::Empty)
    .collect();
  entries.sort_by(|(a, _), (b, _)| a.cmp(b));

  let mut rows = Vec::new();
  for (key, cells) in entries {
    match cells {
      Cells::Scalar(value) => rows.push(TableRow {
        label: Some(key.clone()),
        value,
        span: 1,
      }),
      Cells::List(values) => {
        let span = values.len();
        for (index, value) in values.into_iter().enumerate() {
          rows.push(TableRow {
            label: (index == 0).then(|| key.clone()),
            value,
            span: if index == 0 { span } else { 1 },
          });
        }
      }
      Cells::Empty => {}
    }
  }

  rows
}

/// Like [`normalize`], but an empty table becomes a single `N/A` row.
pub fn render_rows<V: TableValue>(map: &IndexMap<String, V>) -> Vec<TableRow> {
  let rows = normalize(map);
  if rows.is_empty() {
    return vec![TableRow::placeholder()];
  }
  rows
}
