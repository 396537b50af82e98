//! Application layer for Fledge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (BuildService, InstallService,
//!   TagService, ScaffoldService) on top of the step [`Sequencer`]
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactReport, BootstrapOutcome, BuildReport, BuildService, InstallOutcome, InstallService,
    OutputDirOutcome, ScaffoldOptions, ScaffoldReport, ScaffoldService, SequenceReport, Sequencer,
    StepResult, StepStatus, TagOutcome, TagService, format_size,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Confirmer, DirectoryOpener, FileInfo, Filesystem, ManifestSource, OpenOutcome, ProcessRunner,
};

pub use error::ApplicationError;
