//! Infrastructure adapters for Fledge.
//!
//! This crate implements the ports defined in `fledge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod desktop;
pub mod filesystem;
pub mod manifest;
pub mod process;

// Re-export commonly used adapters
pub use desktop::DesktopOpener;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::PubspecManifest;
pub use process::{Palette, ScriptedRunner, SpinnerRunner};
