//! Runs an ordered list of steps through a [`ProcessRunner`].

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::ProcessRunner,
    domain::{FailurePolicy, Step},
};

/// Final state of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// Ran and exited non-zero, or could not be started.
    Failed,
    /// The program is not installed.
    Missing,
    /// Not run because an earlier step failed under
    /// [`FailurePolicy::StopOnFailure`].
    Skipped,
}

impl StepStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Missing)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Missing => "missing",
            Self::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub label: String,
    pub command: String,
    pub status: StepStatus,
}

/// Per-step outcome of one [`Sequencer::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    results: Vec<StepResult>,
}

impl SequenceReport {
    pub fn results(&self) -> &[StepResult] {
        &self.results
    }

    pub fn all_succeeded(&self) -> bool {
        self.results
            .iter()
            .all(|r| r.status == StepStatus::Succeeded)
    }

    pub fn failed(&self) -> impl Iterator<Item = &StepResult> {
        self.results.iter().filter(|r| r.status.is_failure())
    }

    /// Number of steps that were actually attempted.
    pub fn ran(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status != StepStatus::Skipped)
            .count()
    }

    pub fn first_failure(&self) -> Option<&StepResult> {
        self.failed().next()
    }
}

/// Runs steps one at a time, honoring a [`FailurePolicy`].
pub struct Sequencer<'a> {
    runner: &'a dyn ProcessRunner,
    policy: FailurePolicy,
}

impl<'a> Sequencer<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, policy: FailurePolicy) -> Self {
        Self { runner, policy }
    }

    #[instrument(skip_all, fields(steps = steps.len(), policy = %self.policy))]
    pub fn run(&self, steps: &[Step]) -> SequenceReport {
        let mut report = SequenceReport::default();
        let mut stopped = false;

        for step in steps {
            let status = if stopped {
                StepStatus::Skipped
            } else {
                self.run_one(step)
            };

            if status.is_failure() && self.policy == FailurePolicy::StopOnFailure {
                stopped = true;
            }

            report.results.push(StepResult {
                label: step.label().to_string(),
                command: step.command_line(),
                status,
            });
        }

        report
    }

    fn run_one(&self, step: &Step) -> StepStatus {
        debug!(command = %step.command_line(), "Running step");
        match self.runner.run(step) {
            Ok(true) => StepStatus::Succeeded,
            Ok(false) => {
                warn!(step = step.label(), "Step exited unsuccessfully");
                StepStatus::Failed
            }
            Err(e) if e.is_program_missing() => {
                warn!(program = step.program(), "Program not found");
                StepStatus::Missing
            }
            Err(e) => {
                warn!(step = step.label(), error = %e, "Step could not be started");
                StepStatus::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockProcessRunner};

    fn steps() -> Vec<Step> {
        vec![
            Step::new("one", "a"),
            Step::new("two", "b"),
            Step::new("three", "c"),
        ]
    }

    #[test]
    fn continue_runs_every_step_after_a_failure() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(3)
            .returning(|step| Ok(step.program() != "a"));

        let report = Sequencer::new(&runner, FailurePolicy::Continue).run(&steps());

        assert_eq!(report.ran(), 3);
        assert!(!report.all_succeeded());
        assert_eq!(report.failed().count(), 1);
        assert_eq!(report.results()[2].status, StepStatus::Succeeded);
    }

    #[test]
    fn stop_on_failure_skips_the_rest() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(2)
            .returning(|step| Ok(step.program() != "b"));

        let report = Sequencer::new(&runner, FailurePolicy::StopOnFailure).run(&steps());

        assert_eq!(report.ran(), 2);
        assert_eq!(report.results()[1].status, StepStatus::Failed);
        assert_eq!(report.results()[2].status, StepStatus::Skipped);
        assert_eq!(report.first_failure().unwrap().label, "two");
    }

    #[test]
    fn missing_program_is_reported_distinctly() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|step| {
            Err(ApplicationError::ProgramNotFound {
                program: step.program().to_string(),
            }
            .into())
        });

        let report =
            Sequencer::new(&runner, FailurePolicy::Continue).run(&[Step::new("x", "flutter")]);

        assert_eq!(report.results()[0].status, StepStatus::Missing);
        assert!(report.results()[0].status.is_failure());
    }

    #[test]
    fn spawn_failure_counts_as_failed() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_| {
            Err(ApplicationError::SpawnFailed {
                program: "adb".into(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let report =
            Sequencer::new(&runner, FailurePolicy::StopOnFailure).run(&[Step::new("x", "adb")]);

        assert_eq!(report.results()[0].status, StepStatus::Failed);
    }

    #[test]
    fn empty_sequence_succeeds() {
        let runner = MockProcessRunner::new();
        let report = Sequencer::new(&runner, FailurePolicy::Continue).run(&[]);
        assert!(report.all_succeeded());
        assert_eq!(report.ran(), 0);
    }
}
