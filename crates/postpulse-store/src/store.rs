//! Filesystem persistence for artifacts.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::artifacts::{ArtifactSet, DailyActivity, DailyEngagement, TermFrequencies};
use crate::StoreError;

pub const ACTIVITY_FILE: &str = "daily_activity.json";
pub const ENGAGEMENT_FILE: &str = "daily_engagement.json";
pub const TERMS_FILE: &str = "most_common_terms.json";

/// Handle on the artifact directory.
///
/// Holds nothing but the directory path: every read opens and parses the
/// file fresh, so a new aggregator run is visible to the query service
/// without any restart or cache invalidation.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn activity_path(&self) -> PathBuf {
        self.dir.join(ACTIVITY_FILE)
    }

    #[must_use]
    pub fn engagement_path(&self) -> PathBuf {
        self.dir.join(ENGAGEMENT_FILE)
    }

    #[must_use]
    pub fn terms_path(&self) -> PathBuf {
        self.dir.join(TERMS_FILE)
    }

    /// Read and parse `daily_activity.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] if the file does not exist,
    /// [`StoreError::Malformed`] if it is not the expected JSON shape.
    pub fn read_activity(&self) -> Result<DailyActivity, StoreError> {
        read_artifact(&self.activity_path())
    }

    /// Read and parse `daily_engagement.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] if the file does not exist (including
    /// when the last run had no engagement columns), [`StoreError::Malformed`]
    /// if it is not the expected JSON shape.
    pub fn read_engagement(&self) -> Result<DailyEngagement, StoreError> {
        read_artifact(&self.engagement_path())
    }

    /// Read and parse `most_common_terms.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] if the file does not exist,
    /// [`StoreError::Malformed`] if it is not the expected JSON shape.
    pub fn read_terms(&self) -> Result<TermFrequencies, StoreError> {
        read_artifact(&self.terms_path())
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_activity(&self, activity: &DailyActivity) -> Result<(), StoreError> {
        self.write_artifact(&self.activity_path(), activity)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_engagement(&self, engagement: &DailyEngagement) -> Result<(), StoreError> {
        self.write_artifact(&self.engagement_path(), engagement)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created or the file
    /// cannot be written.
    pub fn write_terms(&self, terms: &TermFrequencies) -> Result<(), StoreError> {
        self.write_artifact(&self.terms_path(), terms)
    }

    /// Persist one run's full output, overwriting whatever a previous run left.
    ///
    /// A run without engagement data also removes a stale
    /// `daily_engagement.json`, so the directory always describes exactly the
    /// latest run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on the first write (or stale-file removal) that
    /// fails.
    pub fn write_set(&self, artifacts: &ArtifactSet) -> Result<(), StoreError> {
        self.write_activity(&artifacts.activity)?;
        match &artifacts.engagement {
            Some(engagement) => self.write_engagement(engagement)?,
            None => {
                self.remove_engagement()?;
            }
        }
        self.write_terms(&artifacts.terms)
    }

    /// Delete `daily_engagement.json` if present.
    ///
    /// Returns `true` if a file was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for removal failures other than the file
    /// being absent.
    pub fn remove_engagement(&self) -> Result<bool, StoreError> {
        let path = self.engagement_path();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    fn write_artifact<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let json = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Encode {
            path: path.display().to_string(),
            source: e,
        })?;

        std::fs::write(path, json).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::Missing {
                path: path.display().to_string(),
            })
        }
        Err(e) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
        path: path.display().to_string(),
        source: e,
    })
}
