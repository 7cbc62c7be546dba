//! Row validation and coercion into typed records.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use postpulse_core::DatasetProfile;
use serde_json::Value;

use crate::dataset::Dataset;
use crate::error::AggregateError;

/// A single post after cleaning. Engagement counts default to zero for
/// datasets without engagement columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub text: String,
    pub likes: f64,
    pub retweets: f64,
}

/// Result of cleaning one dataset.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub records: Vec<Record>,
    /// Whether both engagement columns were present in the source.
    pub has_engagement: bool,
    /// Rows discarded because their timestamp did not parse.
    pub dropped_rows: usize,
}

/// Timestamp layouts accepted in addition to RFC 3339, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Validate a dataset against a profile and coerce its rows.
///
/// Rows whose timestamp cannot be parsed are dropped and counted, never
/// fatal. Missing or non-string text becomes a plain string; engagement
/// values that are absent, non-numeric, or negative become zero.
///
/// # Errors
///
/// Returns [`AggregateError::MissingColumn`] when the profile's text or
/// timestamp column is not present in the dataset.
pub fn clean_dataset(
    dataset: &Dataset,
    profile: &DatasetProfile,
) -> Result<CleanedDataset, AggregateError> {
    for column in [&profile.text_column, &profile.timestamp_column] {
        if !dataset.has_column(column) {
            return Err(AggregateError::MissingColumn {
                column: column.clone(),
            });
        }
    }

    let has_engagement =
        dataset.has_column(&profile.likes_column) && dataset.has_column(&profile.retweets_column);

    let mut records = Vec::with_capacity(dataset.len());
    let mut dropped = 0usize;
    for row in dataset.rows() {
        let Some(date) = row.get(&profile.timestamp_column).and_then(parse_timestamp) else {
            dropped += 1;
            tracing::debug!(
                timestamp = ?row.get(&profile.timestamp_column),
                "dropping row with unparsable timestamp"
            );
            continue;
        };

        let text = row.get(&profile.text_column).map_or_else(String::new, text_value);
        let (likes, retweets) = if has_engagement {
            (
                engagement_value(row.get(&profile.likes_column)),
                engagement_value(row.get(&profile.retweets_column)),
            )
        } else {
            (0.0, 0.0)
        };

        records.push(Record {
            date,
            text,
            likes,
            retweets,
        });
    }

    Ok(CleanedDataset {
        records,
        has_engagement,
        dropped_rows: dropped,
    })
}

/// Extract a calendar date from a raw timestamp value.
///
/// Accepts RFC 3339 plus a fixed set of common layouts. Anything else,
/// including numeric values, yields `None`.
fn parse_timestamp(value: &Value) -> Option<NaiveDate> {
    let Value::String(raw) = value else {
        return None;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    None
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Coerce an engagement cell to a non-negative count. Numeric strings
/// are accepted; everything else counts as zero.
fn engagement_value(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.map_or(0.0, |count| count.max(0.0))
}
