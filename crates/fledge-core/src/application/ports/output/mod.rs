//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fledge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::domain::{ProjectManifest, Step};
use crate::error::FledgeResult;

/// A file found by [`Filesystem::list_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fledge_adapters::filesystem::LocalFilesystem` (production)
/// - `fledge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FledgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> FledgeResult<()>;

    /// Read a UTF-8 file. `Ok(None)` when it does not exist.
    fn read_to_string(&self, path: &Path) -> FledgeResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file. Returns `false` when there was nothing to remove.
    fn remove_file(&self, path: &Path) -> FledgeResult<bool>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FledgeResult<()>;

    /// Files directly inside `dir` whose extension is `extension`, sorted by
    /// path. A missing directory yields an empty list.
    fn list_files(&self, dir: &Path, extension: &str) -> FledgeResult<Vec<FileInfo>>;
}

/// Port for running one external command.
///
/// Implemented by:
/// - `fledge_adapters::process::SpinnerRunner` (production, with spinner)
/// - `fledge_adapters::process::ScriptedRunner` (testing)
#[cfg_attr(test, automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `step` to completion.
    ///
    /// `Ok(true)` on exit status 0, `Ok(false)` on any other exit status.
    /// `Err(ApplicationError::ProgramNotFound)` when the program cannot be
    /// located, which callers must be able to tell apart from a failed run.
    fn run(&self, step: &Step) -> FledgeResult<bool>;

    /// Run `step` without any terminal feedback. For queries where a
    /// non-zero exit is an answer rather than a failure.
    fn probe(&self, step: &Step) -> FledgeResult<bool>;
}

/// Port for reading the project manifest.
#[cfg_attr(test, automock)]
pub trait ManifestSource: Send + Sync {
    /// Load the manifest at `path`.
    ///
    /// `ApplicationError::ManifestNotFound` when the file is missing.
    fn load(&self, path: &Path) -> FledgeResult<ProjectManifest>;
}

/// What happened when asked to show a directory to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The host platform has no known file-browser launcher.
    Unsupported,
}

/// Port for opening a directory in the desktop file browser.
#[cfg_attr(test, automock)]
pub trait DirectoryOpener: Send + Sync {
    fn open(&self, dir: &Path) -> FledgeResult<OpenOutcome>;
}

/// Port for yes/no questions.
#[cfg_attr(test, automock)]
pub trait Confirmer: Send + Sync {
    fn confirm(&self, question: &str) -> FledgeResult<bool>;
}
