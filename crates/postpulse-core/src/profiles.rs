use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Column-name mapping for one dataset shape.
///
/// The aggregator only ever addresses input columns through a profile, so a
/// new dataset layout means a new entry in the profiles file, not a code
/// change. `likes_column`/`retweets_column` name where engagement counts
/// *would* be; whether they actually exist is checked against the loaded
/// dataset, and their absence just disables the engagement artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub name: String,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    #[serde(default = "default_likes_column")]
    pub likes_column: String,
    #[serde(default = "default_retweets_column")]
    pub retweets_column: String,
}

fn default_text_column() -> String {
    "Text".to_string()
}

fn default_timestamp_column() -> String {
    "Timestamp".to_string()
}

fn default_likes_column() -> String {
    "Likes".to_string()
}

fn default_retweets_column() -> String {
    "Retweets".to_string()
}

impl Default for DatasetProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            text_column: default_text_column(),
            timestamp_column: default_timestamp_column(),
            likes_column: default_likes_column(),
            retweets_column: default_retweets_column(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfilesFile {
    pub profiles: Vec<DatasetProfile>,
}

/// Load and validate dataset profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profiles(path: &Path) -> Result<ProfilesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfilesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profiles_file: ProfilesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ProfilesFileParse)?;

    validate_profiles(&profiles_file)?;

    Ok(profiles_file)
}

/// Resolve the profile to aggregate with.
///
/// `None` selects the built-in default profile without touching the profiles
/// file; `Some(name)` loads the file and looks the profile up by exact name.
///
/// # Errors
///
/// Returns `ConfigError` if the profiles file cannot be loaded or the named
/// profile does not exist in it.
pub fn resolve_profile(path: &Path, name: Option<&str>) -> Result<DatasetProfile, ConfigError> {
    let Some(name) = name else {
        return Ok(DatasetProfile::default());
    };

    let profiles_file = load_profiles(path)?;
    profiles_file
        .profiles
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| ConfigError::UnknownProfile {
            name: name.to_string(),
            path: path.display().to_string(),
        })
}

fn validate_profiles(profiles_file: &ProfilesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for profile in &profiles_file.profiles {
        if profile.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "profile name must be non-empty".to_string(),
            ));
        }

        let lower_name = profile.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate profile name: '{}'",
                profile.name
            )));
        }

        for (label, column) in [
            ("text_column", &profile.text_column),
            ("timestamp_column", &profile.timestamp_column),
            ("likes_column", &profile.likes_column),
            ("retweets_column", &profile.retweets_column),
        ] {
            if column.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "profile '{}' has an empty {label}",
                    profile.name
                )));
            }
        }
    }

    Ok(())
}
