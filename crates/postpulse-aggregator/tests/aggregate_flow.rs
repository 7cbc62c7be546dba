//! Integration tests for the public aggregation flow.
//!
//! Each test writes a real dataset file into a temp directory, runs the
//! aggregation through the crate's public API, and inspects the artifact
//! files the way a downstream consumer (the query service) would.

use postpulse_aggregator::{run_aggregation, AggregateError};
use postpulse_core::DatasetProfile;
use postpulse_store::ArtifactStore;

/// Writes `content` as a dataset file and returns its path.
fn write_dataset(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write dataset");
    path
}

/// Profile matching a lowercase scraper export layout.
fn export_profile() -> DatasetProfile {
    DatasetProfile {
        name: "scraper-export".to_string(),
        text_column: "text".to_string(),
        timestamp_column: "created_at".to_string(),
        likes_column: "like_count".to_string(),
        retweets_column: "retweet_count".to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV input, artifact shapes on disk
// ---------------------------------------------------------------------------

#[test]
fn csv_run_produces_date_keyed_artifacts_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(
        &dir,
        "posts.csv",
        "Text,Timestamp,Likes,Retweets\n\
         morning post,2023-01-15 08:00:00,10,2\n\
         evening post,2023-01-15 20:00:00,20,4\n\
         next day,2023-01-16 09:00:00,5,0\n",
    );
    let store = ArtifactStore::new(dir.path().join("processed_data"));

    run_aggregation(&dataset, &DatasetProfile::default(), &store).expect("run");

    // The activity artifact is a JSON object keyed by ISO dates.
    let raw = std::fs::read_to_string(store.activity_path()).expect("read activity");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("parse activity");
    assert_eq!(parsed["2023-01-15"].as_u64(), Some(2));
    assert_eq!(parsed["2023-01-16"].as_u64(), Some(1));

    // Engagement carries the two fixed mean fields per date.
    let raw = std::fs::read_to_string(store.engagement_path()).expect("read engagement");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("parse engagement");
    assert!((parsed["2023-01-15"]["mean_likes"].as_f64().unwrap() - 15.0).abs() < f64::EPSILON);
    assert!((parsed["2023-01-15"]["mean_retweets"].as_f64().unwrap() - 3.0).abs() < f64::EPSILON);

    // Terms serialize as [term, count] pairs.
    let raw = std::fs::read_to_string(store.terms_path()).expect("read terms");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("parse terms");
    assert_eq!(parsed[0][0].as_str(), Some("post"));
    assert_eq!(parsed[0][1].as_u64(), Some(2));
}

// ---------------------------------------------------------------------------
// JSON input with native number types
// ---------------------------------------------------------------------------

#[test]
fn json_run_accepts_native_numeric_engagement() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(
        &dir,
        "posts.json",
        r#"[
            {"Text": "alpha", "Timestamp": "2023-02-01T10:00:00Z", "Likes": 4, "Retweets": 1},
            {"Text": "bravo", "Timestamp": "2023-02-01T12:00:00Z", "Likes": 6, "Retweets": 3}
        ]"#,
    );
    let store = ArtifactStore::new(dir.path().join("processed_data"));

    let (artifacts, summary) =
        run_aggregation(&dataset, &DatasetProfile::default(), &store).expect("run");

    assert!(summary.has_engagement);
    let engagement = artifacts.engagement.expect("engagement present");
    let stats = engagement.values().next().expect("one day");
    assert!((stats.mean_likes - 5.0).abs() < f64::EPSILON);
    assert!((stats.mean_retweets - 2.0).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// Custom column profiles
// ---------------------------------------------------------------------------

#[test]
fn custom_profile_maps_lowercase_columns() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(
        &dir,
        "export.jsonl",
        "{\"text\": \"export row\", \"created_at\": \"2023-03-05\", \"like_count\": 7, \"retweet_count\": 2}\n",
    );
    let store = ArtifactStore::new(dir.path().join("processed_data"));

    let (artifacts, summary) = run_aggregation(&dataset, &export_profile(), &store).expect("run");

    assert_eq!(summary.rows_aggregated, 1);
    assert!(summary.has_engagement);
    assert_eq!(artifacts.activity.values().sum::<u64>(), 1);
}

#[test]
fn default_profile_rejects_mismatched_columns() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(
        &dir,
        "export.jsonl",
        "{\"text\": \"export row\", \"created_at\": \"2023-03-05\"}\n",
    );
    let store = ArtifactStore::new(dir.path().join("processed_data"));

    let err = run_aggregation(&dataset, &DatasetProfile::default(), &store).unwrap_err();
    assert!(matches!(err, AggregateError::MissingColumn { .. }));
}

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

#[test]
fn unsupported_extension_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(&dir, "posts.txt", "Text,Timestamp\nhello,2023-01-15\n");
    let store = ArtifactStore::new(dir.path().join("processed_data"));

    let err = run_aggregation(&dataset, &DatasetProfile::default(), &store).unwrap_err();
    assert!(matches!(err, AggregateError::UnsupportedFormat { .. }));
    assert!(!store.activity_path().exists());
}
