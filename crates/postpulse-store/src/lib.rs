//! Artifact schema and persistence for postpulse.
//!
//! The aggregator and the query service share no state except three JSON
//! files in one directory. This crate owns both sides of that contract: the
//! typed schema of each artifact and the code that reads/writes it. Reads
//! always parse into the typed schema, so a hand-edited or truncated file
//! surfaces as [`StoreError::Malformed`] instead of leaking downstream.

use thiserror::Error;

pub mod artifacts;
pub mod store;

pub use artifacts::{ArtifactSet, DailyActivity, DailyEngagement, EngagementStats, TermFrequencies};
pub use store::{ArtifactStore, ACTIVITY_FILE, ENGAGEMENT_FILE, TERMS_FILE};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The artifact file does not exist (the aggregator has not produced it).
    #[error("artifact not found at {path}; run the aggregator first")]
    Missing { path: String },

    /// The artifact file exists but is not valid JSON of the expected shape.
    #[error("artifact at {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory artifact could not be encoded to JSON.
    #[error("failed to encode artifact for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other read/write failure.
    #[error("artifact I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
