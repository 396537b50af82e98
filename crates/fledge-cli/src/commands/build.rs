//! Build-family commands: `apk`, `split-apk`, `aab`, `lang`, `codegen`,
//! `setup`, `cache-repair`, `cleanup`, `release-run`, `pod`.

use tracing::instrument;

use fledge_core::application::{BuildReport, BuildService, OutputDirOutcome};
use fledge_core::domain::BuildRecipe;

use crate::{
    commands::{Adapters, install},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip(config, output), fields(recipe = %recipe))]
pub fn execute(recipe: BuildRecipe, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let adapters = Adapters::local(config, output);

    output.headline(recipe.headline())?;

    let service = BuildService::new(
        adapters.runner.clone(),
        adapters.filesystem.clone(),
        adapters.opener.clone(),
        config.toolchain.clone(),
        config.paths.clone(),
    )
    .with_open_output(config.output.open_artifacts);

    let report = service.run(recipe)?;
    render(&report, output)?;

    if recipe == BuildRecipe::ReleaseRun {
        let installer = install::service(config, &adapters);
        install::render(installer.install()?, &config.paths.apk_dir, output)?;
    }

    if report.succeeded() {
        Ok(())
    } else {
        Err(steps_failed(&report))
    }
}

fn render(report: &BuildReport, output: &OutputManager) -> CliResult<()> {
    for path in &report.removed {
        output.info(&format!("Removed {}", path.display()))?;
    }

    if let Some(artifacts) = &report.artifacts {
        if artifacts.is_empty() {
            output.warning(&format!(
                "No {} found in {}",
                artifacts.kind.display_name(),
                artifacts.dir.display()
            ))?;
        }
        for file in &artifacts.files {
            output.artifact(artifacts.kind, file)?;
        }
    }

    match &report.output_dir {
        Some(OutputDirOutcome::Opened(path)) => {
            output.info(&format!("Opened {}", path.display()))?;
        }
        Some(OutputDirOutcome::Unsupported(path)) => {
            output.info(&format!("Output directory: {}", path.display()))?;
        }
        Some(OutputDirOutcome::Failed { path, reason }) => {
            output.warning(&format!("Could not open {}: {reason}", path.display()))?;
        }
        None => {}
    }

    if report.succeeded() {
        output.success(report.recipe.success_message())?;
    } else {
        output.error(&format!(
            "{} of {} steps failed",
            report.sequence.failed().count(),
            report.sequence.results().len()
        ))?;
    }
    Ok(())
}

fn steps_failed(report: &BuildReport) -> CliError {
    CliError::StepsFailed {
        command: report.recipe.name().to_string(),
        failed: report
            .sequence
            .failed()
            .map(|r| format!("{} ({}): {}", r.label.trim_end_matches("..."), r.command, r.status))
            .collect(),
    }
}
