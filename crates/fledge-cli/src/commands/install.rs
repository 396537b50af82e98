//! Device install / uninstall.

use std::path::Path;

use fledge_core::application::{InstallOutcome, InstallService};

use crate::{
    commands::Adapters,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn service(config: &AppConfig, adapters: &Adapters) -> InstallService {
    InstallService::new(
        adapters.runner.clone(),
        adapters.filesystem.clone(),
        config.toolchain.clone(),
        config.paths.clone(),
        config.android.application_id.clone(),
    )
}

/// `fledge uninstall`
pub fn uninstall(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let adapters = Adapters::local(config, output);
    let installer = service(config, &adapters);

    let application_id = installer.application_id()?;
    output.headline(&format!("Uninstalling {application_id}..."))?;

    if installer.uninstall()? {
        output.success("App uninstalled successfully!")?;
        Ok(())
    } else {
        Err(CliError::UninstallFailed { application_id })
    }
}

/// Print the installer result; anything but an install is an error.
pub fn render(outcome: InstallOutcome, apk_dir: &Path, output: &OutputManager) -> CliResult<()> {
    match outcome {
        InstallOutcome::Installed { apk, reinstalled } => {
            if reinstalled {
                output.info("Previous install was removed before retrying")?;
            }
            output.success(&format!(
                "APK built and installed successfully! ({})",
                apk.display()
            ))?;
            Ok(())
        }
        InstallOutcome::Failed { apk } => {
            output.error("APK built but install failed!")?;
            Err(CliError::InstallFailed { apk })
        }
        InstallOutcome::NoArtifact => {
            output.error("No APK found to install!")?;
            Err(CliError::ArtifactNotFound {
                dir: apk_dir.to_path_buf(),
            })
        }
    }
}
