//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fledge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: External command execution
//!   - `ManifestSource`: `pubspec.yaml` reading
//!   - `DirectoryOpener`: Desktop file browser
//!   - `Confirmer`: Interactive yes/no
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Confirmer, DirectoryOpener, FileInfo, Filesystem, ManifestSource, OpenOutcome, ProcessRunner,
};

#[cfg(test)]
pub use output::{
    MockConfirmer, MockDirectoryOpener, MockFilesystem, MockManifestSource, MockProcessRunner,
};
