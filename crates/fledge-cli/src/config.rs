//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the value objects it is
//! handed (`Toolchain`, `ProjectPaths`).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FLEDGE__SECTION__KEY`, e.g.
//!    `FLEDGE__PROCESS__TICK_MS=50`
//! 3. `--config FILE` (must exist)
//! 4. `fledge.toml` in the current directory
//! 5. Global config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use fledge_core::{
    application::services::tag_service::DEFAULT_REMOTE,
    domain::{ProjectPaths, Toolchain},
};

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = "fledge.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FLEDGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Spinner and process settings.
    pub process: ProcessConfig,
    /// Project file locations.
    pub paths: ProjectPaths,
    /// External program names.
    pub toolchain: Toolchain,
    pub android: AndroidConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Open the APK/AAB folder after a package build.
    pub open_artifacts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            open_artifacts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Spinner frame interval in milliseconds.
    pub tick_ms: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self { tick_ms: 25 }
    }
}

impl ProcessConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Overrides the `applicationId` read from Gradle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the process environment.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(
            Some(Self::config_path()),
            Path::new(LOCAL_CONFIG_FILE),
            config_file.map(PathBuf::as_path),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    /// Layer every source over the defaults.
    fn load_from(
        global: Option<PathBuf>,
        local: &Path,
        explicit: Option<&Path>,
        env: Environment,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default config")?,
        );

        if let Some(global) = global {
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder.add_source(File::from(local).required(false));
        if let Some(explicit) = explicit {
            builder = builder.add_source(File::from(explicit).required(true));
        }

        builder
            .add_source(
                env.prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `fledge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "fledge", "fledge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}
