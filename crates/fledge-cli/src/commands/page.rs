//! `fledge page <name>`: scaffold a feature module.

use tracing::instrument;

use fledge_core::application::{BootstrapOutcome, ScaffoldOptions, ScaffoldReport, ScaffoldService};
use fledge_core::domain::{CallAnchor, FsEntry};

use crate::{
    cli::PageArgs,
    commands::Adapters,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(feature = %args.name))]
pub fn execute(args: PageArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let adapters = Adapters::local(config, output);
    let service = ScaffoldService::new(
        adapters.filesystem.clone(),
        adapters.manifests.clone(),
        config.paths.clone(),
    );

    let options = ScaffoldOptions {
        force: args.force,
        dry_run: args.dry_run,
    };

    output.headline(&format!("Creating feature {}...", args.name.trim()))?;
    let report = service.scaffold(&args.name, options)?;
    render(&report, output)
}

fn render(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    let structure = &report.structure;

    if report.dry_run {
        output.header("Dry run, nothing was written. Would create:")?;
    }

    output.tree(
        structure.root(),
        structure
            .entries()
            .iter()
            .map(|e| (e.path(), matches!(e, FsEntry::Directory(_)))),
    )?;

    match &report.bootstrap {
        BootstrapOutcome::Patched {
            path,
            import_added,
            anchor,
        } => {
            let verb = if report.dry_run { "Would register" } else { "Registered" };
            let place = match anchor {
                CallAnchor::SetupTail => " (added feature marker)",
                _ => "",
            };
            output.info(&format!(
                "{verb} {}Di in {}{place}",
                report.feature.class_prefix(),
                path.display()
            ))?;
            if !import_added {
                output.info("Import was already present")?;
            }
        }
        BootstrapOutcome::Unchanged { path } => {
            output.info(&format!("{} already registers this feature", path.display()))?;
        }
        BootstrapOutcome::Missing { path } => {
            output.warning(&format!(
                "{} not found; register the feature's DI setup by hand",
                path.display()
            ))?;
        }
        BootstrapOutcome::NoAnchor { path } => {
            output.warning(&format!(
                "No setup method or '//Feature DI setup' marker in {}",
                path.display()
            ))?;
        }
        BootstrapOutcome::Failed { path, reason } => {
            output.warning(&format!("Could not update {}: {reason}", path.display()))?;
        }
    }

    if !report.dry_run {
        output.success(&format!(
            "Feature {} created in project {}",
            report.feature, report.project
        ))?;
    }
    Ok(())
}
