//! Fledge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Fledge
//! Flutter project helper, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            fledge-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Build, Install, Tag, Scaffold)        │
//! │  Sequencer runs steps under a policy    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ProcessRunner, Filesystem, Manifest,   │
//! │  DirectoryOpener, Confirmer)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    fledge-adapters (Infrastructure)     │
//! │ (SpinnerRunner, LocalFilesystem, etc.)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (BuildRecipe, FeatureName, Bootstrap)   │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fledge_core::prelude::*;
//!
//! let service = BuildService::new(
//!     Arc::new(runner),     // impl ProcessRunner
//!     Arc::new(filesystem), // impl Filesystem
//!     Arc::new(opener),     // impl DirectoryOpener
//!     Toolchain::default(),
//!     ProjectPaths::default(),
//! );
//! let report = service.run(BuildRecipe::Apk)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildService, InstallService, ScaffoldService, Sequencer, TagService,
        ports::{Confirmer, DirectoryOpener, Filesystem, ManifestSource, ProcessRunner},
    };
    pub use crate::domain::{
        BuildRecipe, FailurePolicy, FeatureName, ProjectManifest, ProjectPaths, ReleaseTag, Step,
        Toolchain,
    };
    pub use crate::error::{FledgeError, FledgeResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
