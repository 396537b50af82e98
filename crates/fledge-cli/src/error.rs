//! CLI error type: every failure a command can end with, its exit code and
//! how it is shown on stderr.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use fledge_core::error::FledgeError;

// Re-export so callers only need `use crate::error::*`.
pub use fledge_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `fledge-core`.
    #[error("{0}")]
    Core(#[from] FledgeError),

    // ── Build / device / git outcomes ─────────────────────────────────────
    /// One or more steps of a build-family command failed. Every step still
    /// ran.
    #[error("{command}: {} step(s) failed", failed.len())]
    StepsFailed { command: String, failed: Vec<String> },

    /// No package to install.
    #[error("No APK found in {}", dir.display())]
    ArtifactNotFound { dir: PathBuf },

    /// `adb install` failed twice.
    #[error("Install failed for {}", apk.display())]
    InstallFailed { apk: PathBuf },

    /// `adb uninstall` exited non-zero.
    #[error("Uninstall of {application_id} failed")]
    UninstallFailed { application_id: String },

    /// A tag step failed; later steps were skipped.
    #[error("Tagging {tag} failed at '{step}'")]
    TagFailed { tag: String, step: String },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check fledge.toml and FLEDGE__* environment variables".into(),
                "Use 'fledge init' to create a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::StepsFailed { failed, .. } => {
                let mut out = vec!["These steps failed:".to_string()];
                out.extend(failed.iter().map(|s| format!("  • {s}")));
                out.push("Check the command output above for details".into());
                out
            }

            Self::ArtifactNotFound { dir } => vec![
                format!("Nothing to install in {}", dir.display()),
                "Run 'fledge apk' first".into(),
            ],

            Self::InstallFailed { .. } => vec![
                "Check that a device is connected: adb devices".into(),
                "Check that USB debugging is enabled".into(),
            ],

            Self::UninstallFailed { application_id } => vec![
                format!("Is {} installed on the device?", application_id),
                "Check that a device is connected: adb devices".into(),
            ],

            Self::TagFailed { tag, .. } => vec![
                format!("Inspect the tag with: git show {}", tag),
                "Check that the remote exists and you can push to it".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::ExternalCommand => ErrorCategory::ExternalCommand,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::StepsFailed { .. }
            | Self::InstallFailed { .. }
            | Self::UninstallFailed { .. }
            | Self::TagFailed { .. } => ErrorCategory::ExternalCommand,
            Self::ArtifactNotFound { .. } => ErrorCategory::NotFound,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category         | Code |
    /// |------------------|------|
    /// | User error       |  2   |
    /// | Not found        |  3   |
    /// | Configuration    |  4   |
    /// | External command |  1   |
    /// | Internal         |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::ExternalCommand | ErrorCategory::Internal => 1,
        }
    }

    /// Error report for a colour terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report as [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, styled: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if styled { style(text) } else { text.to_string() }
        };

        let mut lines = vec![
            String::new(),
            format!(
                "{} {}",
                paint("✗", |t| t.red().bold().to_string()),
                paint("Error:", |t| t.red().bold().to_string())
            ),
            format!("  {}", paint(&self.to_string(), |t| t.red().to_string())),
        ];

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                lines.push(format!(
                    "  {} {}",
                    paint("caused by:", |t| t.dimmed().to_string()),
                    err
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:", |t| t.yellow().bold().to_string()));
            lines.extend(suggestions.iter().map(|s| format!("  {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint("Run with -v for more detail.", |t| {
                t.dimmed().to_string()
            }));
        }

        lines.push(String::new());
        lines.join("\n")
    }

    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, exit_code = self.exit_code(), "{self}")
            }
            _ => tracing::warn!(?category, exit_code = self.exit_code(), "{self}"),
        }

        if let Some(source) = self.source() {
            tracing::debug!(%source, "Underlying error");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// An external program failed or is missing.
    ExternalCommand,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
