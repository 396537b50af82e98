// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Fledge.
//!
//! This module contains pure business logic. All I/O, process spawning and
//! console output are handled via ports (traits) defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or terminal calls
//! - **Few external crates**: std, thiserror, serde derives, regex
//! - **Immutable values**: Domain objects are Clone + PartialEq
pub mod bootstrap;
pub mod entities;
pub mod error;
pub mod feature;
pub mod layout;
pub mod manifest;
pub mod recipe;
pub mod templates;

pub use bootstrap::{BootstrapPatch, CallAnchor, FEATURE_DI_MARKER, PatchResult};
pub use entities::{
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render_context::RenderContext,
};
pub use error::{DomainError, ErrorCategory};
pub use feature::FeatureName;
pub use layout::{FEATURE_DIRECTORIES, FEATURE_FILES, FeatureLayout};
pub use manifest::{ProjectManifest, ReleaseTag};
pub use recipe::{ArtifactKind, BuildRecipe, FailurePolicy, ProjectPaths, Step, Toolchain};
