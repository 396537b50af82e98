//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The external program is not installed or not on `PATH`.
    #[error("Program not found: {program}")]
    ProgramNotFound { program: String },

    /// The program exists but could not be started.
    #[error("Failed to start '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// The project manifest is missing.
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The project manifest exists but could not be read or parsed.
    #[error("Could not read manifest {path}: {reason}")]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The feature directory is already there.
    #[error("Feature already exists at {path}")]
    FeatureExists { path: PathBuf },

    /// No Android application id configured or discoverable.
    #[error("Android application id is unknown")]
    ApplicationIdUnknown { searched: Vec<PathBuf> },

    /// Interactive confirmation could not be obtained.
    #[error("Confirmation failed: {reason}")]
    PromptFailed { reason: String },

    /// Adapter state lock was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProgramNotFound { program } => vec![
                format!("'{}' was not found on PATH", program),
                "Install it or point fledge at it in fledge.toml ([toolchain])".into(),
            ],
            Self::SpawnFailed { program, .. } => vec![
                format!("'{}' exists but could not be started", program),
                "Check that it is executable".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("{} not found in the current directory", path.display()),
                "Run this command from the root of a Flutter project".into(),
            ],
            Self::ManifestUnreadable { path, .. } => vec![
                format!("Check that {} is valid YAML", path.display()),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::FeatureExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite the generated files".into(),
                "Choose a different feature name".into(),
            ],
            Self::ApplicationIdUnknown { searched } => {
                let mut out = vec![
                    "Set android.application_id in fledge.toml".into(),
                    "Or declare applicationId in one of:".into(),
                ];
                out.extend(searched.iter().map(|p| format!("  • {}", p.display())));
                out
            }
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProgramNotFound { .. } | Self::SpawnFailed { .. } => {
                ErrorCategory::ExternalCommand
            }
            Self::ManifestNotFound { .. } | Self::ApplicationIdUnknown { .. } => {
                ErrorCategory::NotFound
            }
            Self::ManifestUnreadable { .. } | Self::FeatureExists { .. } => {
                ErrorCategory::Validation
            }
            Self::FilesystemError { .. }
            | Self::LockPoisoned
            | Self::PromptFailed { .. } => ErrorCategory::Internal,
        }
    }
}
