use thiserror::Error;

/// Errors surfaced by the aggregation pipeline.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV dataset {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON dataset {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected JSON structure in {path}: {reason}")]
    JsonShape { path: String, reason: String },

    #[error("unsupported dataset format for {path}; expected .csv, .json, or .jsonl")]
    UnsupportedFormat { path: String },

    #[error("required column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error(transparent)]
    Store(#[from] postpulse_store::StoreError),
}
