//! Artifact status command handler.

use postpulse_store::{ArtifactStore, StoreError};

/// Show a summary of the currently published artifacts.
///
/// Missing artifacts are reported, not fatal; an artifact that exists
/// but cannot be parsed is an error.
///
/// # Errors
///
/// Returns an error when an artifact file is present but malformed.
pub(crate) fn run_status(store: &ArtifactStore) -> anyhow::Result<()> {
    println!("artifact directory: {}", store.dir().display());

    match store.read_activity() {
        Ok(activity) => {
            let posts: u64 = activity.values().sum();
            let range = match (activity.keys().next(), activity.keys().next_back()) {
                (Some(first), Some(last)) => format!("{first} to {last}"),
                _ => "no days".to_string(),
            };
            println!(
                "{:<20}{} days, {} posts, {}",
                "daily activity",
                activity.len(),
                posts,
                range
            );
        }
        Err(StoreError::Missing { .. }) => {
            println!("{:<20}not generated; run `aggregate` first", "daily activity");
        }
        Err(e) => return Err(e.into()),
    }

    match store.read_engagement() {
        Ok(engagement) => {
            println!("{:<20}{} days", "daily engagement", engagement.len());
        }
        Err(StoreError::Missing { .. }) => {
            println!("{:<20}not generated", "daily engagement");
        }
        Err(e) => return Err(e.into()),
    }

    match store.read_terms() {
        Ok(terms) => {
            let preview: Vec<&str> = terms.iter().take(5).map(|(term, _)| term.as_str()).collect();
            println!(
                "{:<20}{} terms [{}]",
                "most common terms",
                terms.len(),
                preview.join(", ")
            );
        }
        Err(StoreError::Missing { .. }) => {
            println!("{:<20}not generated", "most common terms");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
