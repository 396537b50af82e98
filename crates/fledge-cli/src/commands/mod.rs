//! Command handlers. Each one wires adapters into a core service and renders
//! the result through [`OutputManager`].

use std::sync::Arc;

use chrono::Local;

use fledge_adapters::{DesktopOpener, LocalFilesystem, PubspecManifest, SpinnerRunner};
use fledge_core::application::{DirectoryOpener, Filesystem, ManifestSource, ProcessRunner};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod install;
pub mod page;
pub mod tag;

/// Production adapters, built once per command.
pub struct Adapters {
    pub runner: Arc<dyn ProcessRunner>,
    pub filesystem: Arc<dyn Filesystem>,
    pub manifests: Arc<dyn ManifestSource>,
    pub opener: Arc<dyn DirectoryOpener>,
}

impl Adapters {
    pub fn local(config: &AppConfig, output: &OutputManager) -> Self {
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let runner = SpinnerRunner::new(output.palette())
            .with_tick(config.process.tick())
            .quiet(output.is_quiet());

        Self {
            runner: Arc::new(runner),
            manifests: Arc::new(PubspecManifest::new(Arc::clone(&filesystem))),
            filesystem,
            opener: Arc::new(DesktopOpener::new()),
        }
    }
}

/// Run `handler` and print how long it took, whatever the outcome.
pub fn timed<T>(output: &OutputManager, handler: impl FnOnce() -> CliResult<T>) -> CliResult<T> {
    let started = Local::now();
    let result = handler();
    let elapsed = (Local::now() - started).to_std().unwrap_or_default();
    tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, ok = result.is_ok(), "Command finished");
    let _ = output.elapsed(elapsed);
    result
}
