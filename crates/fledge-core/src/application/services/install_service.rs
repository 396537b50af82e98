//! Installs the built APK on a connected device through `adb`.

use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileInfo, Filesystem, ProcessRunner},
    },
    domain::{ArtifactKind, ProjectPaths, Toolchain},
    error::FledgeResult,
};

/// ABI preferred when several APKs were produced.
pub const PREFERRED_ABI: &str = "arm64-v8a";

static APPLICATION_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"applicationId\s*=?\s*["']([A-Za-z0-9_.]+)["']"#)
        .expect("valid applicationId regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing to install.
    NoArtifact,
    Installed { apk: PathBuf, reinstalled: bool },
    Failed { apk: PathBuf },
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

pub struct InstallService {
    runner: Arc<dyn ProcessRunner>,
    filesystem: Arc<dyn Filesystem>,
    toolchain: Toolchain,
    paths: ProjectPaths,
    configured_id: Option<String>,
}

impl InstallService {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        filesystem: Arc<dyn Filesystem>,
        toolchain: Toolchain,
        paths: ProjectPaths,
        configured_id: Option<String>,
    ) -> Self {
        Self {
            runner,
            filesystem,
            toolchain,
            paths,
            configured_id,
        }
    }

    /// APK to install: the `arm64-v8a` split if present, else the first by
    /// name.
    pub fn select_apk(&self) -> FledgeResult<Option<PathBuf>> {
        let kind = ArtifactKind::Apk;
        let apks = self
            .filesystem
            .list_files(kind.output_dir(&self.paths), kind.extension())?;
        Ok(pick_apk(apks))
    }

    /// Install with `adb install -r`. If that fails, uninstall the app once
    /// and try the install exactly one more time.
    #[instrument(skip(self))]
    pub fn install(&self) -> FledgeResult<InstallOutcome> {
        let Some(apk) = self.select_apk()? else {
            warn!(dir = %self.paths.apk_dir.display(), "No APK to install");
            return Ok(InstallOutcome::NoArtifact);
        };

        info!(apk = %apk.display(), "Installing");
        if self.runner.run(&self.toolchain.adb_install(&apk))? {
            return Ok(InstallOutcome::Installed {
                apk,
                reinstalled: false,
            });
        }

        match self.application_id() {
            Ok(application_id) => {
                warn!(%application_id, "Install failed, uninstalling before retry");
                if let Err(e) = self.runner.run(&self.toolchain.adb_uninstall(&application_id)) {
                    debug!(error = %e, "Uninstall before retry failed");
                }
            }
            Err(e) => warn!(error = %e, "Install failed, retrying without uninstall"),
        }

        if self.runner.run(&self.toolchain.adb_install(&apk))? {
            Ok(InstallOutcome::Installed {
                apk,
                reinstalled: true,
            })
        } else {
            Ok(InstallOutcome::Failed { apk })
        }
    }

    /// `adb uninstall <application id>`.
    #[instrument(skip(self))]
    pub fn uninstall(&self) -> FledgeResult<bool> {
        let application_id = self.application_id()?;
        info!(%application_id, "Uninstalling");
        self.runner
            .run(&self.toolchain.adb_uninstall(&application_id))
    }

    /// Configured id, else the first `applicationId` found in the Gradle
    /// build files.
    pub fn application_id(&self) -> FledgeResult<String> {
        if let Some(id) = self.configured_id.as_deref().filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }

        for gradle in &self.paths.gradle_files {
            let Some(content) = self.filesystem.read_to_string(gradle)? else {
                continue;
            };
            if let Some(caps) = APPLICATION_ID_RE.captures(&content) {
                debug!(file = %gradle.display(), "Found applicationId");
                return Ok(caps[1].to_string());
            }
        }

        Err(ApplicationError::ApplicationIdUnknown {
            searched: self.paths.gradle_files.clone(),
        }
        .into())
    }
}

fn pick_apk(mut apks: Vec<FileInfo>) -> Option<PathBuf> {
    apks.sort_by(|a, b| a.path.cmp(&b.path));
    let preferred = apks.iter().position(|f| {
        f.path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().contains(PREFERRED_ABI))
    });
    match preferred {
        Some(i) => Some(apks.swap_remove(i).path),
        None => apks.into_iter().next().map(|f| f.path),
    }
}
