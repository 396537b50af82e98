//! Build recipes: fixed, ordered lists of external-process steps.
//!
//! A recipe never branches on intermediate results. Whether a failing step
//! stops the rest is declared per recipe through [`FailurePolicy`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ── Step ─────────────────────────────────────────────────────────────────────

/// One external command invocation with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    label: String,
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl Step {
    pub fn new(label: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the step from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// `program arg1 arg2`, for logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.command_line())
    }
}

// ── Failure policy ───────────────────────────────────────────────────────────

/// What a sequence does after a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Run every step regardless of earlier failures.
    Continue,
    /// Skip every step after the first failure.
    StopOnFailure,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::StopOnFailure => write!(f, "stop-on-failure"),
        }
    }
}

// ── Toolchain ────────────────────────────────────────────────────────────────

/// Program names for every external tool Fledge drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub flutter: String,
    pub dart: String,
    pub adb: String,
    pub pod: String,
    pub git: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            flutter: "flutter".into(),
            dart: "dart".into(),
            adb: "adb".into(),
            pod: "pod".into(),
            git: "git".into(),
        }
    }
}

impl Toolchain {
    pub fn clean(&self) -> Step {
        Step::new("Cleaning project...", &self.flutter).arg("clean")
    }

    pub fn pub_get(&self) -> Step {
        Step::new("Getting dependencies...", &self.flutter).args(["pub", "get"])
    }

    pub fn pub_upgrade(&self, label: &str) -> Step {
        Step::new(label, &self.flutter).args(["pub", "upgrade"])
    }

    pub fn build_runner(&self, label: &str) -> Step {
        Step::new(label, &self.dart).args([
            "run",
            "build_runner",
            "build",
            "--delete-conflicting-outputs",
        ])
    }

    pub fn gen_l10n(&self) -> Step {
        Step::new("Generating localizations...", &self.flutter).arg("gen-l10n")
    }

    pub fn analyze(&self) -> Step {
        Step::new("Analyzing code...", &self.flutter).arg("analyze")
    }

    pub fn format(&self) -> Step {
        Step::new("Formatting code...", &self.dart).args(["format", "."])
    }

    pub fn cache_repair(&self) -> Step {
        Step::new("Repairing pub cache...", &self.flutter).args(["pub", "cache", "repair"])
    }

    /// Release APK for arm64 only.
    pub fn build_apk(&self) -> Step {
        Step::new("Building APK...", &self.flutter).args([
            "build",
            "apk",
            "--release",
            "--obfuscate",
            "--target-platform",
            "android-arm64",
            "--split-debug-info=./",
        ])
    }

    /// One release APK per ABI.
    pub fn build_split_apks(&self) -> Step {
        Step::new("Building split APKs...", &self.flutter).args([
            "build",
            "apk",
            "--release",
            "--obfuscate",
            "--split-per-abi",
            "--split-debug-info=./",
        ])
    }

    pub fn build_appbundle(&self) -> Step {
        Step::new("Building AAB...", &self.flutter).args([
            "build",
            "appbundle",
            "--release",
            "--obfuscate",
            "--split-debug-info=./",
        ])
    }

    pub fn pod_repo_update(&self, ios_dir: &Path) -> Step {
        Step::new("Updating pod repository...", &self.pod)
            .args(["repo", "update"])
            .in_dir(ios_dir)
    }

    pub fn pod_install(&self, ios_dir: &Path) -> Step {
        Step::new("Installing pods...", &self.pod)
            .arg("install")
            .in_dir(ios_dir)
    }

    pub fn adb_install(&self, apk: &Path) -> Step {
        Step::new("Installing on device...", &self.adb)
            .args(["install", "-r"])
            .arg(apk.display().to_string())
    }

    pub fn adb_uninstall(&self, application_id: &str) -> Step {
        Step::new("Uninstalling from device...", &self.adb)
            .arg("uninstall")
            .arg(application_id)
    }

    /// Exits 0 only when `refs/tags/<tag>` exists.
    pub fn git_tag_exists(&self, tag: &str) -> Step {
        Step::new("Checking for existing tag...", &self.git)
            .args(["rev-parse", "-q", "--verify"])
            .arg(format!("refs/tags/{tag}"))
    }

    pub fn git_tag_delete(&self, tag: &str) -> Step {
        Step::new("Deleting local tag...", &self.git)
            .args(["tag", "-d", tag])
    }

    pub fn git_tag_create(&self, tag: &str) -> Step {
        Step::new("Creating tag...", &self.git)
            .args(["tag", "-a", tag, "-m"])
            .arg(format!("Release {tag}"))
    }

    pub fn git_push_tag(&self, remote: &str, tag: &str, force: bool) -> Step {
        let step = Step::new("Pushing tag...", &self.git).args(["push", remote, tag]);
        if force { step.arg("--force") } else { step }
    }
}

// ── Project paths ────────────────────────────────────────────────────────────

/// Where Fledge expects project files and build outputs, relative to the
/// project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPaths {
    pub manifest: PathBuf,
    pub apk_dir: PathBuf,
    pub bundle_dir: PathBuf,
    pub features_root: PathBuf,
    pub service_locator: PathBuf,
    pub ios_dir: PathBuf,
    pub gradle_files: Vec<PathBuf>,
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self {
            manifest: "pubspec.yaml".into(),
            apk_dir: "build/app/outputs/flutter-apk".into(),
            bundle_dir: "build/app/outputs/bundle/release".into(),
            features_root: "lib/features".into(),
            service_locator: "lib/core/di/service_locator.dart".into(),
            ios_dir: "ios".into(),
            gradle_files: vec![
                "android/app/build.gradle.kts".into(),
                "android/app/build.gradle".into(),
            ],
        }
    }
}

// ── Artifacts ────────────────────────────────────────────────────────────────

/// Kind of package a recipe produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Apk,
    AppBundle,
}

impl ArtifactKind {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Apk => "apk",
            Self::AppBundle => "aab",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Apk => "APK",
            Self::AppBundle => "AAB",
        }
    }

    pub fn output_dir<'a>(&self, paths: &'a ProjectPaths) -> &'a Path {
        match self {
            Self::Apk => &paths.apk_dir,
            Self::AppBundle => &paths.bundle_dir,
        }
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

/// Every build-family command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildRecipe {
    Apk,
    SplitApk,
    AppBundle,
    Localizations,
    Codegen,
    Setup,
    CacheRepair,
    Cleanup,
    ReleaseRun,
    Pods,
}

impl BuildRecipe {
    pub const ALL: [BuildRecipe; 10] = [
        Self::Apk,
        Self::SplitApk,
        Self::AppBundle,
        Self::Localizations,
        Self::Codegen,
        Self::Setup,
        Self::CacheRepair,
        Self::Cleanup,
        Self::ReleaseRun,
        Self::Pods,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Apk => "apk",
            Self::SplitApk => "split-apk",
            Self::AppBundle => "aab",
            Self::Localizations => "lang",
            Self::Codegen => "codegen",
            Self::Setup => "setup",
            Self::CacheRepair => "cache-repair",
            Self::Cleanup => "cleanup",
            Self::ReleaseRun => "release-run",
            Self::Pods => "pod",
        }
    }

    /// Line printed before the first step.
    pub const fn headline(&self) -> &'static str {
        match self {
            Self::Apk => "Building APK (Full Process)...",
            Self::SplitApk => "Building split APKs (Full Process)...",
            Self::AppBundle => "Building AAB...",
            Self::Localizations => "Generating localization files...",
            Self::Codegen => "Executing build_runner...",
            Self::Setup => "Performing full setup...",
            Self::CacheRepair => "Repairing pub cache...",
            Self::Cleanup => "Cleaning up project...",
            Self::ReleaseRun => "Building & Installing Release APK...",
            Self::Pods => "Updating iOS pods...",
        }
    }

    /// Line printed when every step succeeded.
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Apk => "APK built successfully!",
            Self::SplitApk => "Split APKs built successfully!",
            Self::AppBundle => "AAB built successfully!",
            Self::Localizations => "Localizations generated successfully.",
            Self::Codegen => "Code generation completed.",
            Self::Setup => "Full setup completed successfully.",
            Self::CacheRepair => "Pub cache repaired successfully.",
            Self::Cleanup => "Project cleaned successfully!",
            Self::ReleaseRun => "APK built successfully!",
            Self::Pods => "iOS pods updated successfully!",
        }
    }

    /// Build-family recipes are fire-and-forget.
    pub const fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Continue
    }

    /// Package produced by this recipe, if any.
    pub const fn artifact(&self) -> Option<ArtifactKind> {
        match self {
            Self::Apk | Self::SplitApk | Self::ReleaseRun => Some(ArtifactKind::Apk),
            Self::AppBundle => Some(ArtifactKind::AppBundle),
            _ => None,
        }
    }

    /// Whether the output folder is opened in the file browser afterwards.
    pub const fn opens_output(&self) -> bool {
        matches!(self, Self::Apk | Self::SplitApk | Self::AppBundle)
    }

    /// Files removed before the first step runs.
    pub fn stale_files(&self, paths: &ProjectPaths) -> Vec<PathBuf> {
        match self {
            Self::Pods => vec![paths.ios_dir.join("Podfile.lock")],
            _ => Vec::new(),
        }
    }

    /// The fixed, ordered step list.
    pub fn steps(&self, tools: &Toolchain, paths: &ProjectPaths) -> Vec<Step> {
        match self {
            Self::Apk => vec![
                tools.clean(),
                tools.pub_get(),
                tools.build_runner("Generating build files..."),
                tools.build_apk(),
            ],
            Self::SplitApk => vec![
                tools.clean(),
                tools.pub_get(),
                tools.build_runner("Generating build files..."),
                tools.build_split_apks(),
            ],
            Self::AppBundle => vec![
                tools.clean(),
                tools.pub_get(),
                tools.build_runner("Generating build files..."),
                tools.build_appbundle(),
            ],
            Self::Localizations => vec![tools.gen_l10n()],
            Self::Codegen => vec![tools.build_runner("Running build_runner...")],
            Self::Setup => vec![
                tools.clean(),
                tools.pub_upgrade("Upgrading dependencies..."),
                tools.build_runner("Running build_runner..."),
                tools.gen_l10n(),
                tools.pub_upgrade("Refreshing dependencies..."),
                tools.analyze(),
                tools.format(),
            ],
            Self::CacheRepair => vec![tools.cache_repair()],
            Self::Cleanup => vec![tools.clean(), tools.pub_get()],
            Self::ReleaseRun => vec![
                tools.clean(),
                tools.pub_get(),
                tools.gen_l10n(),
                tools.build_runner("Generating build files..."),
                tools.build_apk(),
            ],
            Self::Pods => vec![
                tools.pod_repo_update(&paths.ios_dir),
                tools.pod_install(&paths.ios_dir),
            ],
        }
    }
}

impl fmt::Display for BuildRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programs(recipe: BuildRecipe) -> Vec<String> {
        recipe
            .steps(&Toolchain::default(), &ProjectPaths::default())
            .iter()
            .map(Step::command_line)
            .collect()
    }

    #[test]
    fn apk_recipe_order() {
        let steps = programs(BuildRecipe::Apk);
        assert_eq!(steps[0], "flutter clean");
        assert_eq!(steps[1], "flutter pub get");
        assert!(steps[2].starts_with("dart run build_runner build"));
        assert!(steps[3].contains("--target-platform android-arm64"));
    }

    #[test]
    fn split_apk_builds_per_abi() {
        let steps = programs(BuildRecipe::SplitApk);
        assert!(steps.last().unwrap().contains("--split-per-abi"));
    }

    #[test]
    fn setup_has_seven_steps() {
        assert_eq!(programs(BuildRecipe::Setup).len(), 7);
    }

    #[test]
    fn pods_run_inside_ios_dir() {
        let steps = BuildRecipe::Pods.steps(&Toolchain::default(), &ProjectPaths::default());
        assert!(steps.iter().all(|s| s.cwd() == Some(Path::new("ios"))));
        assert_eq!(
            BuildRecipe::Pods.stale_files(&ProjectPaths::default()),
            vec![PathBuf::from("ios/Podfile.lock")]
        );
    }

    #[test]
    fn every_recipe_has_steps_and_continues_on_failure() {
        for recipe in BuildRecipe::ALL {
            assert!(
                !recipe
                    .steps(&Toolchain::default(), &ProjectPaths::default())
                    .is_empty(),
                "{recipe} has no steps"
            );
            assert_eq!(recipe.failure_policy(), FailurePolicy::Continue);
        }
    }

    #[test]
    fn custom_toolchain_is_used() {
        let tools = Toolchain {
            flutter: "fvm-flutter".into(),
            ..Toolchain::default()
        };
        let steps = BuildRecipe::Cleanup.steps(&tools, &ProjectPaths::default());
        assert!(steps.iter().all(|s| s.program() == "fvm-flutter"));
    }

    #[test]
    fn git_steps() {
        let tools = Toolchain::default();
        assert_eq!(
            tools.git_tag_exists("v1.2.3").command_line(),
            "git rev-parse -q --verify refs/tags/v1.2.3"
        );
        assert_eq!(
            tools.git_tag_create("v1.2.3").arguments(),
            ["tag", "-a", "v1.2.3", "-m", "Release v1.2.3"]
        );
        assert_eq!(
            tools.git_push_tag("origin", "v1.2.3", true).command_line(),
            "git push origin v1.2.3 --force"
        );
    }

    #[test]
    fn artifacts_map_to_output_dirs() {
        let paths = ProjectPaths::default();
        assert_eq!(
            BuildRecipe::AppBundle.artifact().unwrap().output_dir(&paths),
            Path::new("build/app/outputs/bundle/release")
        );
        assert_eq!(BuildRecipe::Localizations.artifact(), None);
        assert!(!BuildRecipe::ReleaseRun.opens_output());
    }
}
