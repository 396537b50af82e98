//! Opens folders in the platform file browser.

use std::path::Path;
use std::process::{Command, Stdio};

use fledge_core::{
    application::{
        ApplicationError,
        ports::{DirectoryOpener, OpenOutcome},
    },
    error::FledgeResult,
};
use tracing::debug;

/// Launcher for the host platform, if one is known.
pub const fn launcher() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some("open")
    } else if cfg!(target_os = "linux") {
        Some("xdg-open")
    } else if cfg!(target_os = "windows") {
        Some("explorer")
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopOpener;

impl DesktopOpener {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryOpener for DesktopOpener {
    fn open(&self, dir: &Path) -> FledgeResult<OpenOutcome> {
        let Some(program) = launcher() else {
            return Ok(OpenOutcome::Unsupported);
        };
        debug!(program, dir = %dir.display(), "Opening directory");

        let status = Command::new(program)
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ApplicationError::SpawnFailed {
                program: program.into(),
                reason: e.to_string(),
            })?;

        // explorer.exe reports 1 even when the window opened
        if status.success() || cfg!(target_os = "windows") {
            Ok(OpenOutcome::Opened)
        } else {
            Err(ApplicationError::SpawnFailed {
                program: program.into(),
                reason: format!("exited with {status}"),
            }
            .into())
        }
    }
}
