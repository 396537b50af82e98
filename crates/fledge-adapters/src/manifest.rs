//! `pubspec.yaml` reader.

use std::path::Path;
use std::sync::Arc;

use fledge_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestSource},
    },
    domain::ProjectManifest,
    error::FledgeResult,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Pubspec {
    #[serde(default)]
    name: Option<String>,
    /// Kept as written: an unquoted `1.10` must not become `1.1`.
    #[serde(default)]
    version: Option<String>,
}

/// Reads the manifest through a [`Filesystem`], so it works the same on
/// disk and in memory.
pub struct PubspecManifest {
    filesystem: Arc<dyn Filesystem>,
}

impl PubspecManifest {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl ManifestSource for PubspecManifest {
    fn load(&self, path: &Path) -> FledgeResult<ProjectManifest> {
        let Some(content) = self.filesystem.read_to_string(path)? else {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        };

        let unreadable = |reason: String| ApplicationError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let pubspec: Pubspec =
            serde_yaml::from_str(&content).map_err(|e| unreadable(e.to_string()))?;

        debug!(name = ?pubspec.name, version = ?pubspec.version, "Loaded pubspec");
        Ok(ProjectManifest::new(
            pubspec.name.unwrap_or_default(),
            pubspec.version,
        )?)
    }
}
