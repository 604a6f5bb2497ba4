//! Shared domain types, target validation, and configuration for Rival Guru.

pub mod app_config;
pub mod config;
pub mod profile;
pub mod table;
pub mod target;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{AnalysisResponse, AnalysisResult, FetchOutcome, Profile};
pub use table::{capitalize, ComparisonTable, ATTRIBUTE_LABELS};
pub use target::{is_valid_website, normalize_target, validate_target};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid website name: \"{target}\"")]
    InvalidTarget { target: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
