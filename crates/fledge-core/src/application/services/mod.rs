//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build an APK" or "scaffold a feature".

pub mod build_service;
pub mod install_service;
pub mod scaffold_service;
pub mod sequencer;
pub mod tag_service;

pub use build_service::{ArtifactReport, BuildReport, BuildService, OutputDirOutcome, format_size};
pub use install_service::{InstallOutcome, InstallService, PREFERRED_ABI};
pub use scaffold_service::{BootstrapOutcome, ScaffoldOptions, ScaffoldReport, ScaffoldService};
pub use sequencer::{SequenceReport, Sequencer, StepResult, StepStatus};
pub use tag_service::{DEFAULT_REMOTE, TagOutcome, TagService};
