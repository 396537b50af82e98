//! Build Service - runs one build-family recipe end to end.
//!
//! 1. Ensure the APK and bundle output directories exist
//! 2. Remove stale files the recipe declares
//! 3. Run the recipe's steps under its failure policy
//! 4. Report produced artifacts and open their folder

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{DirectoryOpener, FileInfo, Filesystem, OpenOutcome, ProcessRunner},
        services::sequencer::{SequenceReport, Sequencer},
    },
    domain::{ArtifactKind, BuildRecipe, ProjectPaths, Toolchain},
    error::FledgeResult,
};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// `1048576` → `"1.00 MB"`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Packages found in a recipe's output directory after it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub dir: PathBuf,
    pub files: Vec<FileInfo>,
}

impl ArtifactReport {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Result of trying to show the output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDirOutcome {
    Opened(PathBuf),
    /// No launcher for this platform; the user has to go there by hand.
    Unsupported(PathBuf),
    Failed { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub recipe: BuildRecipe,
    pub removed: Vec<PathBuf>,
    pub sequence: SequenceReport,
    pub artifacts: Option<ArtifactReport>,
    pub output_dir: Option<OutputDirOutcome>,
}

impl BuildReport {
    pub fn succeeded(&self) -> bool {
        self.sequence.all_succeeded()
    }
}

pub struct BuildService {
    runner: Arc<dyn ProcessRunner>,
    filesystem: Arc<dyn Filesystem>,
    opener: Arc<dyn DirectoryOpener>,
    toolchain: Toolchain,
    paths: ProjectPaths,
    open_output: bool,
}

impl BuildService {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        filesystem: Arc<dyn Filesystem>,
        opener: Arc<dyn DirectoryOpener>,
        toolchain: Toolchain,
        paths: ProjectPaths,
    ) -> Self {
        Self {
            runner,
            filesystem,
            opener,
            toolchain,
            paths,
            open_output: true,
        }
    }

    /// Whether package recipes open their output folder afterwards.
    pub fn with_open_output(mut self, open_output: bool) -> Self {
        self.open_output = open_output;
        self
    }

    #[instrument(skip(self), fields(recipe = %recipe))]
    pub fn run(&self, recipe: BuildRecipe) -> FledgeResult<BuildReport> {
        self.filesystem.create_dir_all(&self.paths.apk_dir)?;
        self.filesystem.create_dir_all(&self.paths.bundle_dir)?;

        let mut removed = Vec::new();
        for stale in recipe.stale_files(&self.paths) {
            if self.filesystem.remove_file(&stale)? {
                info!(path = %stale.display(), "Removed stale file");
                removed.push(stale);
            }
        }

        let steps = recipe.steps(&self.toolchain, &self.paths);
        let sequence = Sequencer::new(self.runner.as_ref(), recipe.failure_policy()).run(&steps);

        let artifacts = match recipe.artifact() {
            Some(kind) => Some(self.collect_artifacts(kind)?),
            None => None,
        };

        let output_dir = match recipe.artifact() {
            Some(kind) if self.open_output && recipe.opens_output() => Some(self.open(kind)),
            _ => None,
        };

        info!(
            ran = sequence.ran(),
            failed = sequence.failed().count(),
            "Recipe finished"
        );

        Ok(BuildReport {
            recipe,
            removed,
            sequence,
            artifacts,
            output_dir,
        })
    }

    fn collect_artifacts(&self, kind: ArtifactKind) -> FledgeResult<ArtifactReport> {
        let dir = kind.output_dir(&self.paths).to_path_buf();
        let files = self.filesystem.list_files(&dir, kind.extension())?;
        Ok(ArtifactReport { kind, dir, files })
    }

    fn open(&self, kind: ArtifactKind) -> OutputDirOutcome {
        let path = kind.output_dir(&self.paths).to_path_buf();
        match self.opener.open(&path) {
            Ok(OpenOutcome::Opened) => OutputDirOutcome::Opened(path),
            Ok(OpenOutcome::Unsupported) => OutputDirOutcome::Unsupported(path),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Could not open output directory");
                OutputDirOutcome::Failed {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::predicate::eq;

    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockDirectoryOpener, MockFilesystem, MockProcessRunner},
    };
    use crate::application::services::sequencer::StepStatus;

    fn permissive_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_remove_file().returning(|_| Ok(false));
        fs
    }

    fn service(
        runner: MockProcessRunner,
        fs: MockFilesystem,
        opener: MockDirectoryOpener,
    ) -> BuildService {
        BuildService::new(
            Arc::new(runner),
            Arc::new(fs),
            Arc::new(opener),
            Toolchain::default(),
            ProjectPaths::default(),
        )
    }

    #[test]
    fn format_size_uses_two_decimals() {
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(15_728_640), "15.00 MB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(0), "0.00 MB");
    }

    #[test]
    fn failing_first_step_does_not_stop_the_apk_recipe() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(4)
            .returning(|step| Ok(step.command_line() != "flutter clean"));

        let mut fs = permissive_fs();
        fs.expect_list_files()
            .with(eq(Path::new("build/app/outputs/flutter-apk")), eq("apk"))
            .returning(|_, _| {
                Ok(vec![FileInfo {
                    path: "build/app/outputs/flutter-apk/app-release.apk".into(),
                    size: 1_048_576,
                }])
            });

        let mut opener = MockDirectoryOpener::new();
        opener
            .expect_open()
            .times(1)
            .returning(|_| Ok(OpenOutcome::Opened));

        let report = service(runner, fs, opener).run(BuildRecipe::Apk).unwrap();

        assert_eq!(report.sequence.ran(), 4);
        assert!(!report.succeeded());
        assert_eq!(report.sequence.results()[0].status, StepStatus::Failed);
        assert_eq!(report.artifacts.as_ref().unwrap().files.len(), 1);
        assert!(matches!(report.output_dir, Some(OutputDirOutcome::Opened(_))));
    }

    #[test]
    fn recipe_without_artifact_skips_listing_and_opening() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(|_| Ok(true));

        let report = service(runner, permissive_fs(), MockDirectoryOpener::new())
            .run(BuildRecipe::Localizations)
            .unwrap();

        assert!(report.succeeded());
        assert!(report.artifacts.is_none());
        assert!(report.output_dir.is_none());
    }

    #[test]
    fn output_dirs_are_created_before_running() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all()
            .with(eq(Path::new("build/app/outputs/flutter-apk")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all()
            .with(eq(Path::new("build/app/outputs/bundle/release")))
            .times(1)
            .returning(|_| Ok(()));

        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_| Ok(true));

        service(runner, fs, MockDirectoryOpener::new())
            .run(BuildRecipe::Codegen)
            .unwrap();
    }

    #[test]
    fn pods_remove_the_lock_file_first() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_remove_file()
            .with(eq(Path::new("ios/Podfile.lock")))
            .times(1)
            .returning(|_| Ok(true));

        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(2).returning(|_| Ok(true));

        let report = service(runner, fs, MockDirectoryOpener::new())
            .run(BuildRecipe::Pods)
            .unwrap();

        assert_eq!(report.removed, vec![PathBuf::from("ios/Podfile.lock")]);
    }

    #[test]
    fn opener_failure_is_not_fatal() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_| Ok(true));

        let mut fs = permissive_fs();
        fs.expect_list_files().returning(|_, _| Ok(Vec::new()));

        let mut opener = MockDirectoryOpener::new();
        opener.expect_open().returning(|_| {
            Err(ApplicationError::SpawnFailed {
                program: "xdg-open".into(),
                reason: "no display".into(),
            }
            .into())
        });

        let report = service(runner, fs, opener).run(BuildRecipe::AppBundle).unwrap();

        assert!(report.artifacts.unwrap().is_empty());
        assert!(matches!(
            report.output_dir,
            Some(OutputDirOutcome::Failed { .. })
        ));
    }

    #[test]
    fn open_output_can_be_disabled() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_| Ok(true));

        let mut fs = permissive_fs();
        fs.expect_list_files().returning(|_, _| Ok(Vec::new()));

        let mut opener = MockDirectoryOpener::new();
        opener.expect_open().never();

        let report = service(runner, fs, opener)
            .with_open_output(false)
            .run(BuildRecipe::SplitApk)
            .unwrap();

        assert!(report.artifacts.is_some());
        assert!(report.output_dir.is_none());
    }
}
