//! Batch aggregation of social-media post dumps.
//!
//! Loads a CSV, JSON, or JSON-lines dataset, cleans it against a
//! dataset profile, and computes the three published artifacts: daily
//! post counts, daily engagement means, and the most common terms.

pub mod clean;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod stats;
mod stop_words;
pub mod terms;

pub use clean::{clean_dataset, CleanedDataset, Record};
pub use dataset::{load_dataset, Dataset};
pub use error::AggregateError;
pub use pipeline::{aggregate, compute_artifacts, run_aggregation, RunSummary};
pub use stats::{daily_activity, daily_engagement};
pub use terms::{most_common_terms, TOP_TERM_COUNT};
