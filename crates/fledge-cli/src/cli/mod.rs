//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use fledge_core::domain::BuildRecipe;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fledge",
    bin_name = "fledge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build, install, tag and scaffold Flutter projects",
    long_about = "Fledge runs the fixed command sequences a Flutter project needs \
                  (clean, dependencies, code generation, packaging, install, tagging) \
                  behind a progress spinner, and scaffolds layered feature modules.",
    after_help = "EXAMPLES:\n\
        \x20 fledge apk\n\
        \x20 fledge release-run\n\
        \x20 fledge page user_profile\n\
        \x20 fledge tag --yes",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the release APK (arm64) from a clean tree.
    #[command(visible_alias = "package-release-build")]
    Apk,

    /// Build one release APK per ABI.
    #[command(visible_alias = "split-architecture-build")]
    SplitApk,

    /// Build the release app bundle.
    #[command(visible_alias = "app-bundle-build")]
    Aab,

    /// Generate localization files.
    #[command(visible_alias = "localization-generation")]
    Lang,

    /// Run build_runner.
    #[command(visible_aliases = ["db", "code-generation"])]
    Codegen,

    /// Clean, upgrade, generate, analyze and format.
    #[command(visible_alias = "full-environment-setup")]
    Setup,

    /// Repair the pub cache.
    #[command(visible_alias = "dependency-cache-repair")]
    CacheRepair,

    /// Clean the project and fetch dependencies.
    #[command(visible_alias = "project-cleanup")]
    Cleanup,

    /// Build the release APK and install it on a connected device.
    #[command(visible_alias = "build-and-install")]
    ReleaseRun,

    /// Uninstall the app from a connected device.
    Uninstall,

    /// Reinstall iOS pods.
    #[command(visible_alias = "ios-dependency-update")]
    Pod,

    /// Tag the pubspec version and push the tag.
    #[command(
        visible_alias = "version-control-tag-and-push",
        after_help = "EXAMPLES:\n\
            \x20 fledge tag          # asks before replacing an existing tag\n\
            \x20 fledge tag --yes    # replaces without asking"
    )]
    Tag(TagArgs),

    /// Scaffold a feature module.
    #[command(
        visible_alias = "feature-scaffold",
        after_help = "EXAMPLES:\n\
            \x20 fledge page user_profile\n\
            \x20 fledge page cart --dry-run\n\
            \x20 fledge page cart --force"
    )]
    Page(PageArgs),

    /// Initialise a Fledge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fledge init           # global config\n\
            \x20 fledge init --local   # fledge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fledge completions bash > ~/.local/share/bash-completion/completions/fledge\n\
            \x20 fledge completions zsh  > ~/.zfunc/_fledge\n\
            \x20 fledge completions fish > ~/.config/fish/completions/fledge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Fledge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fledge config get toolchain.flutter\n\
            \x20 fledge config list\n\
            \x20 fledge --output-format json config list"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// The build recipe behind a build-family command.
    pub fn recipe(&self) -> Option<BuildRecipe> {
        match self {
            Self::Apk => Some(BuildRecipe::Apk),
            Self::SplitApk => Some(BuildRecipe::SplitApk),
            Self::Aab => Some(BuildRecipe::AppBundle),
            Self::Lang => Some(BuildRecipe::Localizations),
            Self::Codegen => Some(BuildRecipe::Codegen),
            Self::Setup => Some(BuildRecipe::Setup),
            Self::CacheRepair => Some(BuildRecipe::CacheRepair),
            Self::Cleanup => Some(BuildRecipe::Cleanup),
            Self::ReleaseRun => Some(BuildRecipe::ReleaseRun),
            Self::Pod => Some(BuildRecipe::Pods),
            Self::Uninstall
            | Self::Tag(_)
            | Self::Page(_)
            | Self::Init(_)
            | Self::Completions(_)
            | Self::Config(_) => None,
        }
    }
}

// ── tag ───────────────────────────────────────────────────────────────────────

/// Arguments for `fledge tag`.
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Replace an existing tag without asking.
    #[arg(short = 'y', long = "yes", help = "Recreate an existing tag without asking")]
    pub yes: bool,
}

// ── page ──────────────────────────────────────────────────────────────────────

/// Arguments for `fledge page`.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Feature name, e.g. `user_profile`.
    #[arg(value_name = "NAME", help = "Feature name (letters, digits, underscores)")]
    pub name: String,

    /// Write into an existing feature directory.
    #[arg(long = "force", help = "Overwrite files of an existing feature")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fledge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `fledge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fledge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `fledge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `toolchain.flutter`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
