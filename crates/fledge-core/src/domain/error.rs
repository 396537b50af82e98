// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported after the fact by services)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid feature name '{name}': {reason}")]
    InvalidFeatureName { name: String, reason: String },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Duplicate path in feature layout: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Feature structure is empty")]
    EmptyStructure,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFeatureName { name, reason } => vec![
                format!("Feature name '{}' is invalid: {}", name, reason),
                "Use lowercase letters, digits and underscores".into(),
                "Start with a letter".into(),
                "Examples: login, user_profile, order_history2".into(),
            ],
            Self::InvalidVersion { version, .. } => vec![
                format!("'{}' is not a usable version", version),
                "Expected something like `version: 1.2.3+45` in pubspec.yaml".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Add a `{}:` entry to pubspec.yaml", field),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFeatureName { .. }
            | Self::InvalidVersion { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::EmptyStructure => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
