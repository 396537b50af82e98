//! Runs one external command behind a terminal spinner.

use std::io::{self, Write};
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use fledge_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::Step,
    error::FledgeResult,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, trace};

use super::Palette;

/// Braille frames, one per tick.
pub const SPINNER_FRAMES: &str = "⡿⣟⣯⣷⣾⣽⣻⢿";

pub const DEFAULT_TICK: Duration = Duration::from_millis(25);

/// Labels are padded to this width so glyphs line up.
pub const LABEL_WIDTH: usize = 53;

/// Production [`ProcessRunner`].
///
/// The child is spawned with piped output. A waiter thread collects it with
/// `wait_with_output`, which drains both pipes, and reports back over a
/// channel while the spinner ticks on its own timer.
#[derive(Debug, Clone)]
pub struct SpinnerRunner {
    palette: Palette,
    tick: Duration,
    quiet: bool,
}

impl SpinnerRunner {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            tick: DEFAULT_TICK,
            quiet: false,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Suppress the spinner and status lines. Failure output is still shown.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn spinner(&self, label: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let template = if self.palette.is_enabled() {
            format!("{{msg:<{LABEL_WIDTH}}}{{spinner:.magenta}}")
        } else {
            format!("{{msg:<{LABEL_WIDTH}}}{{spinner}}")
        };
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(&format!("{SPINNER_FRAMES} "));

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(style);
        bar.set_message(label.to_string());
        bar.enable_steady_tick(self.tick);
        bar
    }

    fn finish(&self, bar: &ProgressBar, label: &str, ok: bool) {
        bar.finish_and_clear();
        if self.quiet {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", self.status_line(label, ok));
    }

    /// The line left behind once the spinner is cleared.
    fn status_line(&self, label: &str, ok: bool) -> String {
        let glyph = if ok {
            self.palette.success_glyph()
        } else {
            self.palette.failure_glyph()
        };
        format!("{label:<LABEL_WIDTH$}{glyph}")
    }

    fn echo_failure(&self, output: &Output) {
        let mut err = io::stderr().lock();
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            let _ = writeln!(err, "\n{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            let _ = writeln!(
                err,
                "\n{}",
                self.palette
                    .error_text(&format!("Error Output:\n{}", stderr.trim_end()))
            );
        }
    }

    fn spawn_and_wait(&self, step: &Step) -> FledgeResult<Output> {
        let program = which::which(step.program()).map_err(|_| ApplicationError::ProgramNotFound {
            program: step.program().to_string(),
        })?;

        let mut command = Command::new(&program);
        command
            .args(step.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = step.cwd() {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|e| ApplicationError::SpawnFailed {
            program: step.program().to_string(),
            reason: e.to_string(),
        })?;

        let (tx, rx) = mpsc::channel();
        let waiter = thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        let received = rx.recv();
        let _ = waiter.join();

        match received {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(ApplicationError::SpawnFailed {
                program: step.program().to_string(),
                reason: e.to_string(),
            }
            .into()),
            Err(_) => Err(ApplicationError::SpawnFailed {
                program: step.program().to_string(),
                reason: "waiter thread exited without a result".into(),
            }
            .into()),
        }
    }
}

impl Default for SpinnerRunner {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl ProcessRunner for SpinnerRunner {
    fn run(&self, step: &Step) -> FledgeResult<bool> {
        debug!(command = %step.command_line(), cwd = ?step.cwd(), "Spawning");
        let bar = self.spinner(step.label());

        let output = match self.spawn_and_wait(step) {
            Ok(output) => output,
            Err(e) => {
                self.finish(&bar, step.label(), false);
                return Err(e);
            }
        };

        let ok = output.status.success();
        self.finish(&bar, step.label(), ok);

        if ok {
            trace!(
                stdout = %String::from_utf8_lossy(&output.stdout),
                "Step output"
            );
        } else {
            debug!(status = %output.status, "Step failed");
            self.echo_failure(&output);
        }

        Ok(ok)
    }

    fn probe(&self, step: &Step) -> FledgeResult<bool> {
        debug!(command = %step.command_line(), "Probing");
        let output = self.spawn_and_wait(step)?;
        Ok(output.status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> SpinnerRunner {
        SpinnerRunner::new(Palette::plain()).quiet(true)
    }

    #[test]
    fn status_line_ends_with_the_outcome_glyph() {
        let runner = SpinnerRunner::new(Palette::plain());

        let done = runner.status_line("Cleaning project...", true);
        let failed = runner.status_line("Cleaning project...", false);

        assert_eq!(done, format!("{:<LABEL_WIDTH$}✓", "Cleaning project..."));
        assert!(failed.starts_with("Cleaning project..."));
        assert!(failed.ends_with('✗'));
        assert_eq!(failed.chars().count(), LABEL_WIDTH + 1);
    }

    #[test]
    fn missing_program_is_distinct() {
        let err = runner()
            .run(&Step::new("x", "fledge-definitely-not-installed"))
            .unwrap_err();
        assert!(err.is_program_missing());
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_maps_to_bool() {
        assert!(runner().run(&Step::new("ok", "true")).unwrap());
        assert!(!runner().run(&Step::new("fail", "false")).unwrap());
        assert!(!runner().probe(&Step::new("fail", "false")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn large_output_does_not_block() {
        // Far more than a pipe buffer on both streams.
        let step = Step::new("chatty", "sh").args([
            "-c",
            "head -c 1000000 /dev/zero; head -c 1000000 /dev/zero >&2; exit 0",
        ]);
        assert!(runner().run(&step).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_step_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker"), "").unwrap();
        let step = Step::new("ls", "test").args(["-f", "marker"]).in_dir(tmp.path());
        assert!(runner().run(&step).unwrap());
    }
}
