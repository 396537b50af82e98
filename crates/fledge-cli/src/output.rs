//! Everything the CLI prints outside of the spinner runner.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;

use fledge_adapters::Palette;
use fledge_core::application::{FileInfo, format_size};
use fledge_core::domain::ArtifactKind;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Always printed, even with `--quiet`. Used for values a command was
    /// asked to return (`config get`, `config path`).
    pub fn value(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// `✓ <msg>` in green.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// `✗ <msg>`.  Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Yellow line announcing what a command is about to do.
    pub fn headline(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.yellow().to_string()
        };
        self.term.write_line(&line)
    }

    /// `APK: app-release.apk | Size: 15.00 MB`
    pub fn artifact(&self, kind: ArtifactKind, file: &FileInfo) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = artifact_line(kind, file);
        let line = if self.no_color {
            line
        } else {
            line.blue().to_string()
        };
        self.term.write_line(&line)
    }

    /// Directory tree of a scaffolded feature. Paths are relative to `root`;
    /// intermediate directories are filled in.
    pub fn tree<'a>(
        &self,
        root: &Path,
        entries: impl IntoIterator<Item = (&'a Path, bool)>,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&format!("{}/", root.display()))?;
        for (path, is_dir) in tree_nodes(entries) {
            let line = tree_line(&path, is_dir);
            let line = if is_dir && !self.no_color {
                line.cyan().to_string()
            } else {
                line
            };
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// `Finished in 1m 5s`
    pub fn elapsed(&self, elapsed: Duration) -> io::Result<()> {
        self.print(&format_elapsed(elapsed))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Colours handed to the spinner runner.
    pub fn palette(&self) -> Palette {
        Palette::new(!self.no_color)
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

fn artifact_line(kind: ArtifactKind, file: &FileInfo) -> String {
    let name = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.path.display().to_string());
    format!(
        "{}: {} | Size: {}",
        kind.display_name(),
        name,
        format_size(file.size)
    )
}

fn tree_nodes<'a>(entries: impl IntoIterator<Item = (&'a Path, bool)>) -> BTreeMap<PathBuf, bool> {
    let mut nodes = BTreeMap::new();
    for (path, is_dir) in entries {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes.insert(ancestor.to_path_buf(), true);
        }
        nodes.insert(path.to_path_buf(), is_dir);
    }
    nodes
}

fn tree_line(path: &Path, is_dir: bool) -> String {
    let depth = path.components().count().max(1);
    let indent = "│   ".repeat(depth - 1);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = if is_dir { "/" } else { "" };
    format!("{indent}├── {name}{suffix}")
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("Finished in {}m {}s", secs / 60, secs % 60)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn artifact_line_shows_name_and_size() {
        let file = FileInfo {
            path: "build/app/outputs/flutter-apk/app-arm64-v8a-release.apk".into(),
            size: 15_728_640,
        };
        assert_eq!(
            artifact_line(ArtifactKind::Apk, &file),
            "APK: app-arm64-v8a-release.apk | Size: 15.00 MB"
        );
    }

    #[test]
    fn elapsed_is_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(65)), "Finished in 1m 5s");
        assert_eq!(
            format_elapsed(Duration::from_millis(999)),
            "Finished in 0m 0s"
        );
    }

    #[test]
    fn tree_lines_are_indented_by_depth() {
        assert_eq!(tree_line(Path::new("di"), true), "├── di/");
        assert_eq!(
            tree_line(Path::new("presentation/ui/cart_page.dart"), false),
            "│   │   ├── cart_page.dart"
        );
    }

    #[test]
    fn tree_fills_in_parent_directories() {
        let nodes = tree_nodes([
            (Path::new("data/models"), true),
            (Path::new("data/repositories/cart_repository_impl.dart"), false),
        ]);
        let paths: Vec<_> = nodes.keys().map(|p| p.display().to_string()).collect();
        assert_eq!(
            paths,
            [
                "data",
                "data/models",
                "data/repositories",
                "data/repositories/cart_repository_impl.dart"
            ]
        );
        assert_eq!(
            nodes.get(Path::new("data/repositories/cart_repository_impl.dart")),
            Some(&false)
        );
    }

    #[test]
    fn plain_format_disables_color() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert!(!out.supports_color());
        assert!(!out.palette().is_enabled());
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn human_format_keeps_color_unless_disabled() {
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn quiet_is_reported() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.is_quiet());
        assert!(out.print("hidden").is_ok());
    }
}
