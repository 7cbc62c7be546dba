//! Shared configuration for the postpulse workspace.
//!
//! Both binaries (the aggregator CLI and the query service) read the same
//! [`AppConfig`] from environment variables, and both resolve dataset column
//! names through [`profiles`]. Nothing in this crate touches the artifact
//! files themselves; that lives in `postpulse-store`.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod profiles;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profiles::{load_profiles, resolve_profile, DatasetProfile, ProfilesFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profiles file {path}: {source}")]
    ProfilesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profiles file: {0}")]
    ProfilesFileParse(#[from] serde_yaml::Error),

    #[error("dataset profile '{name}' not found in {path}")]
    UnknownProfile { name: String, path: String },

    #[error("invalid profiles file: {0}")]
    Validation(String),
}
