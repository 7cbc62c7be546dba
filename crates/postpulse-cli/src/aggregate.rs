//! Dataset aggregation command handler.

use std::path::{Path, PathBuf};

use postpulse_aggregator::{compute_artifacts, run_aggregation, RunSummary};
use postpulse_core::{resolve_profile, AppConfig};
use postpulse_store::ArtifactStore;

/// Aggregate one dataset into the published artifacts.
///
/// Flags override the configured artifact directory and profiles file.
/// When `dry_run` is `true`, every aggregate is computed and summarized
/// but nothing is written.
///
/// # Errors
///
/// Returns an error when the profile cannot be resolved, the dataset
/// cannot be loaded, a required column is missing, or the artifacts
/// cannot be written.
pub(crate) fn run_aggregate(
    config: &AppConfig,
    dataset: &Path,
    profile_name: Option<&str>,
    artifact_dir: Option<PathBuf>,
    profiles_path: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let profiles_path = profiles_path.unwrap_or_else(|| config.profiles_path.clone());
    let profile = resolve_profile(&profiles_path, profile_name)?;
    let artifact_dir = artifact_dir.unwrap_or_else(|| config.artifact_dir.clone());

    let (_, summary) = if dry_run {
        compute_artifacts(dataset, &profile)?
    } else {
        let store = ArtifactStore::new(artifact_dir.clone());
        run_aggregation(dataset, &profile, &store)?
    };

    print_summary(&summary);
    if dry_run {
        println!("dry-run: artifacts not written");
    } else {
        println!("artifacts written to {}", artifact_dir.display());
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "aggregation complete: {} of {} rows aggregated across {} days ({} dropped), {} terms kept",
        summary.rows_aggregated,
        summary.rows_loaded,
        summary.days,
        summary.rows_dropped,
        summary.top_terms
    );
    if !summary.has_engagement {
        println!("no engagement columns found; engagement artifact omitted");
    }
}
