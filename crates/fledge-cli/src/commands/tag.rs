//! `fledge tag`: tag the pubspec version and push it.

use std::io::{self, BufRead, Write};
#[cfg(feature = "interactive")]
use std::io::IsTerminal;
use std::sync::Arc;

use fledge_core::{
    application::{ApplicationError, Confirmer, StepStatus, TagOutcome, TagService},
    error::FledgeResult,
};

use crate::{
    cli::TagArgs,
    commands::Adapters,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: TagArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let adapters = Adapters::local(config, output);
    output.headline("Tagging release...")?;

    let service = TagService::new(
        adapters.runner.clone(),
        adapters.manifests.clone(),
        Arc::new(TerminalConfirmer),
        config.toolchain.clone(),
        config.paths.clone(),
    )
    .with_remote(config.git.remote.clone());

    match service.run(args.yes)? {
        TagOutcome::Pushed { tag, recreated } => {
            let verb = if recreated { "recreated and pushed" } else { "created and pushed" };
            output.success(&format!("Tag {tag} {verb} to {}", config.git.remote))?;
            Ok(())
        }
        TagOutcome::Declined { tag } => {
            output.info(&format!("Kept existing tag {tag}"))?;
            Ok(())
        }
        TagOutcome::Failed { tag, report } => {
            let step = report
                .results()
                .iter()
                .find(|r| r.status.is_failure())
                .map(|r| r.command.clone())
                .unwrap_or_default();
            let skipped = report
                .results()
                .iter()
                .filter(|r| r.status == StepStatus::Skipped)
                .count();
            if skipped > 0 {
                output.warning(&format!("Skipped {skipped} remaining step(s)"))?;
            }
            Err(CliError::TagFailed {
                tag: tag.to_string(),
                step,
            })
        }
    }
}

/// Asks on the terminal. Without a terminal on stdin the answer is read as
/// a plain line, and end of input counts as "no".
struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, question: &str) -> FledgeResult<bool> {
        #[cfg(feature = "interactive")]
        if io::stdin().is_terminal() {
            return dialoguer::Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact()
                .map_err(|e| ApplicationError::PromptFailed {
                    reason: e.to_string(),
                }
                .into());
        }

        let mut stdout = io::stdout().lock();
        write!(stdout, "{question} [y/N] ")
            .and_then(|()| stdout.flush())
            .map_err(prompt_failed)?;
        drop(stdout);

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).map_err(prompt_failed)?;
        Ok(parse_answer(&line))
    }
}

fn prompt_failed(e: io::Error) -> ApplicationError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
