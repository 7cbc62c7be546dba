//! End-to-end aggregation: load, clean, compute, persist.

use std::path::Path;

use postpulse_core::DatasetProfile;
use postpulse_store::{ArtifactSet, ArtifactStore};

use crate::clean::{clean_dataset, CleanedDataset};
use crate::dataset::load_dataset;
use crate::error::AggregateError;
use crate::stats::{daily_activity, daily_engagement};
use crate::terms::{most_common_terms, TOP_TERM_COUNT};

/// Counters describing one aggregation run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Rows decoded from the dataset file.
    pub rows_loaded: usize,
    /// Rows that survived cleaning.
    pub rows_aggregated: usize,
    /// Rows dropped for unparsable timestamps.
    pub rows_dropped: usize,
    /// Distinct calendar days observed.
    pub days: usize,
    /// Whether engagement means were produced.
    pub has_engagement: bool,
    /// Terms kept in the frequency artifact.
    pub top_terms: usize,
}

/// Compute the full artifact set for a dataset without writing anything.
///
/// Used for dry runs and by [`run_aggregation`].
///
/// # Errors
///
/// Returns an error when the dataset cannot be loaded or a required
/// column is missing.
pub fn compute_artifacts(
    dataset_path: &Path,
    profile: &DatasetProfile,
) -> Result<(ArtifactSet, RunSummary), AggregateError> {
    tracing::info!(
        path = %dataset_path.display(),
        profile = %profile.name,
        "loading dataset"
    );
    let dataset = load_dataset(dataset_path)?;
    if dataset.skipped_rows() > 0 {
        tracing::warn!(
            skipped = dataset.skipped_rows(),
            "skipped rows that could not be decoded"
        );
    }

    let cleaned = clean_dataset(&dataset, profile)?;
    if cleaned.dropped_rows > 0 {
        tracing::warn!(
            dropped = cleaned.dropped_rows,
            "dropped rows with unparsable timestamps"
        );
    }

    let artifacts = aggregate(&cleaned);
    let summary = RunSummary {
        rows_loaded: dataset.len(),
        rows_aggregated: cleaned.records.len(),
        rows_dropped: cleaned.dropped_rows,
        days: artifacts.activity.len(),
        has_engagement: cleaned.has_engagement,
        top_terms: artifacts.terms.len(),
    };
    tracing::info!(
        rows = summary.rows_aggregated,
        days = summary.days,
        terms = summary.top_terms,
        "aggregation complete"
    );
    Ok((artifacts, summary))
}

/// Compute the artifact set from already cleaned records.
///
/// Engagement means are only produced when the source dataset carried
/// both engagement columns.
#[must_use]
pub fn aggregate(cleaned: &CleanedDataset) -> ArtifactSet {
    ArtifactSet {
        activity: daily_activity(&cleaned.records),
        engagement: cleaned
            .has_engagement
            .then(|| daily_engagement(&cleaned.records)),
        terms: most_common_terms(&cleaned.records, TOP_TERM_COUNT),
    }
}

/// Run the full aggregation for one dataset and persist the artifacts.
///
/// # Errors
///
/// Returns an error when loading or cleaning fails, or when the
/// artifacts cannot be written.
pub fn run_aggregation(
    dataset_path: &Path,
    profile: &DatasetProfile,
    store: &ArtifactStore,
) -> Result<(ArtifactSet, RunSummary), AggregateError> {
    let (artifacts, summary) = compute_artifacts(dataset_path, profile)?;
    store.write_set(&artifacts)?;
    tracing::info!(dir = %store.dir().display(), "artifacts written");
    Ok((artifacts, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_dataset(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_run_writes_all_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(
            &dir,
            "posts.csv",
            "Text,Timestamp,Likes,Retweets\n\
             product launch today,2023-01-15 09:00:00,10,1\n\
             launch went well,2023-01-15 14:00:00,20,3\n\
             quiet day,2023-01-16 08:00:00,30,2\n",
        );
        let store = ArtifactStore::new(dir.path().join("processed"));

        let (artifacts, summary) =
            run_aggregation(&dataset, &DatasetProfile::default(), &store).unwrap();

        assert_eq!(summary.rows_loaded, 3);
        assert_eq!(summary.rows_aggregated, 3);
        assert_eq!(summary.rows_dropped, 0);
        assert_eq!(summary.days, 2);
        assert!(summary.has_engagement);

        assert_eq!(artifacts.activity[&day(2023, 1, 15)], 2);
        assert_eq!(artifacts.activity[&day(2023, 1, 16)], 1);

        let engagement = artifacts.engagement.as_ref().unwrap();
        assert!((engagement[&day(2023, 1, 15)].mean_likes - 15.0).abs() < f64::EPSILON);
        assert!((engagement[&day(2023, 1, 15)].mean_retweets - 2.0).abs() < f64::EPSILON);

        assert_eq!(artifacts.terms[0], ("launch".to_string(), 2));

        // Everything round-trips through the store.
        assert_eq!(store.read_activity().unwrap(), artifacts.activity);
        assert_eq!(store.read_terms().unwrap(), artifacts.terms);
        assert!(store.read_engagement().is_ok());
    }

    #[test]
    fn activity_total_equals_rows_aggregated() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(
            &dir,
            "posts.jsonl",
            "{\"Text\": \"one\", \"Timestamp\": \"2023-03-01\"}\n\
             {\"Text\": \"two\", \"Timestamp\": \"2023-03-01\"}\n\
             {\"Text\": \"three\", \"Timestamp\": \"bad date\"}\n\
             {\"Text\": \"four\", \"Timestamp\": \"2023-03-04\"}\n",
        );

        let (artifacts, summary) =
            compute_artifacts(&dataset, &DatasetProfile::default()).unwrap();

        let total: u64 = artifacts.activity.values().sum();
        assert_eq!(total, 3);
        assert_eq!(summary.rows_aggregated, 3);
        assert_eq!(summary.rows_dropped, 1);
    }

    #[test]
    fn engagement_artifact_omitted_without_columns() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(
            &dir,
            "posts.csv",
            "Text,Timestamp\nhello,2023-01-15\nworld,2023-01-15\n",
        );
        let store = ArtifactStore::new(dir.path().join("processed"));

        let (artifacts, summary) =
            run_aggregation(&dataset, &DatasetProfile::default(), &store).unwrap();

        assert!(!summary.has_engagement);
        assert!(artifacts.engagement.is_none());
        assert!(!store.engagement_path().exists());
        assert!(store.activity_path().exists());
        assert!(store.terms_path().exists());
    }

    #[test]
    fn rerun_without_engagement_removes_stale_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("processed"));

        let with_engagement = write_dataset(
            &dir,
            "full.csv",
            "Text,Timestamp,Likes,Retweets\nhi,2023-01-15,1,1\n",
        );
        run_aggregation(&with_engagement, &DatasetProfile::default(), &store).unwrap();
        assert!(store.engagement_path().exists());

        let without = write_dataset(&dir, "bare.csv", "Text,Timestamp\nhi,2023-01-16\n");
        run_aggregation(&without, &DatasetProfile::default(), &store).unwrap();
        assert!(!store.engagement_path().exists());
    }

    #[test]
    fn dry_computation_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(&dir, "posts.csv", "Text,Timestamp\nhi,2023-01-15\n");

        let (artifacts, _) = compute_artifacts(&dataset, &DatasetProfile::default()).unwrap();

        assert_eq!(artifacts.activity.len(), 1);
        assert!(!dir.path().join("processed").exists());
    }

    #[test]
    fn missing_required_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(&dir, "posts.csv", "Body,Timestamp\nhi,2023-01-15\n");

        let err = compute_artifacts(&dataset, &DatasetProfile::default()).unwrap_err();
        assert!(matches!(err, AggregateError::MissingColumn { column } if column == "Text"));
    }

    #[test]
    fn empty_dataset_produces_empty_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(&dir, "posts.csv", "Text,Timestamp,Likes,Retweets\n");
        let store = ArtifactStore::new(dir.path().join("processed"));

        let (artifacts, summary) =
            run_aggregation(&dataset, &DatasetProfile::default(), &store).unwrap();

        assert_eq!(summary.rows_loaded, 0);
        assert!(artifacts.activity.is_empty());
        assert!(artifacts.terms.is_empty());
        assert_eq!(store.read_activity().unwrap().len(), 0);
    }
}
