//! Dataset loading for CSV, JSON, and JSON-lines post dumps.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::AggregateError;

/// A loaded dataset: raw rows keyed by column name, before any cleaning.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
    skipped_rows: usize,
}

impl Dataset {
    /// Build a dataset directly from in-memory rows.
    #[must_use]
    pub fn from_parts(columns: Vec<String>, rows: Vec<Map<String, Value>>) -> Self {
        Self {
            columns,
            rows,
            skipped_rows: 0,
        }
    }

    /// Column names present in the dataset.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// Rows that could not be decoded at load time and were skipped.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a dataset from disk, inferring the format from the file extension.
///
/// `.csv` files are parsed with a flexible reader that tolerates ragged
/// rows. `.json` files are expected to hold an array of post objects,
/// with a line-delimited fallback; `.jsonl` files are the reverse.
///
/// # Errors
///
/// Returns an error when the file cannot be read, the extension is not
/// one of `.csv`, `.json`, or `.jsonl`, or the content does not parse
/// in any accepted shape.
pub fn load_dataset(path: &Path) -> Result<Dataset, AggregateError> {
    let label = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| AggregateError::Read {
        path: label.clone(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => parse_csv(&label, &content),
        Some("json") => parse_json(&label, &content),
        Some("jsonl") => parse_jsonl(&label, &content),
        _ => Err(AggregateError::UnsupportedFormat { path: label }),
    }
}

fn parse_csv(label: &str, content: &str) -> Result<Dataset, AggregateError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| AggregateError::Csv {
            path: label.to_string(),
            source,
        })?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };
        let mut row = Map::new();
        for (column, field) in columns.iter().zip(record.iter()) {
            row.insert(column.clone(), Value::String(field.to_string()));
        }
        rows.push(row);
    }

    if skipped > 0 {
        tracing::debug!(path = label, skipped, "skipped undecodable CSV records");
    }
    Ok(Dataset {
        columns,
        rows,
        skipped_rows: skipped,
    })
}

fn parse_json(label: &str, content: &str) -> Result<Dataset, AggregateError> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => Ok(dataset_from_values(items)),
        Ok(other) => Err(AggregateError::JsonShape {
            path: label.to_string(),
            reason: format!("expected an array of post objects, found {}", value_kind(&other)),
        }),
        // Not a single JSON document; it may be line-delimited despite
        // the extension.
        Err(source) => parse_json_lines(content).map_err(|_| AggregateError::Json {
            path: label.to_string(),
            source,
        }),
    }
}

fn parse_jsonl(label: &str, content: &str) -> Result<Dataset, AggregateError> {
    match parse_json_lines(content) {
        Ok(dataset) => Ok(dataset),
        // Fall back to a whole-document array for files misnamed .jsonl.
        Err(line_error) => match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(items)) => Ok(dataset_from_values(items)),
            _ => Err(AggregateError::Json {
                path: label.to_string(),
                source: line_error,
            }),
        },
    }
}

/// Parse line-delimited JSON, one value per non-blank line.
fn parse_json_lines(content: &str) -> Result<Dataset, serde_json::Error> {
    let mut values = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        values.push(serde_json::from_str::<Value>(line)?);
    }
    Ok(dataset_from_values(values))
}

fn dataset_from_values(values: Vec<Value>) -> Dataset {
    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for value in values {
        let Value::Object(row) = value else {
            skipped += 1;
            continue;
        };
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        rows.push(row);
    }
    Dataset {
        columns,
        rows,
        skipped_rows: skipped,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a single object",
    }
}
