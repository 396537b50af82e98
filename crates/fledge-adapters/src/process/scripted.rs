use std::sync::Mutex;

use fledge_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::Step,
    error::FledgeResult,
};

/// Runner that never spawns anything.
///
/// Every step succeeds unless its command line contains a configured
/// failure pattern, or its program was marked missing. Calls are recorded
/// in order.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    failing: Vec<String>,
    missing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps whose command line contains `pattern` exit non-zero.
    pub fn fail_when(mut self, pattern: impl Into<String>) -> Self {
        self.failing.push(pattern.into());
        self
    }

    /// `program` behaves as if it is not installed.
    pub fn without_program(mut self, program: impl Into<String>) -> Self {
        self.missing.push(program.into());
        self
    }

    /// Command lines run so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, step: &Step) -> FledgeResult<bool> {
        self.answer(step)
    }

    fn probe(&self, step: &Step) -> FledgeResult<bool> {
        self.answer(step)
    }
}

impl ScriptedRunner {
    fn answer(&self, step: &Step) -> FledgeResult<bool> {
        let line = step.command_line();
        self.calls
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(line.clone());

        if self.missing.iter().any(|p| p == step.program()) {
            return Err(ApplicationError::ProgramNotFound {
                program: step.program().to_string(),
            }
            .into());
        }

        Ok(!self.failing.iter().any(|p| line.contains(p.as_str())))
    }
}
