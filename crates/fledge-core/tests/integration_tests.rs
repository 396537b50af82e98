//! Integration tests for fledge-core services wired to in-memory adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fledge_adapters::{MemoryFilesystem, PubspecManifest, ScriptedRunner};
use fledge_core::{
    application::{
        BootstrapOutcome, InstallOutcome, OutputDirOutcome, ScaffoldOptions, StepStatus,
        OpenOutcome, TagOutcome,
    },
    domain::{ArtifactKind, FEATURE_DIRECTORIES, FEATURE_FILES},
    error::FledgeResult,
    prelude::*,
};

const PUBSPEC: &str = "name: shop\nversion: 2.1.0+7\n";

const SERVICE_LOCATOR: &str = "\
import 'package:get_it/get_it.dart';

final _serviceLocator = GetIt.instance;

Future<void> setup() async {
  await CoreDi.setup(_serviceLocator);
}
";

struct NoDesktop;

impl DirectoryOpener for NoDesktop {
    fn open(&self, _path: &Path) -> FledgeResult<OpenOutcome> {
        Ok(OpenOutcome::Unsupported)
    }
}

struct Answer(bool);

impl Confirmer for Answer {
    fn confirm(&self, _question: &str) -> FledgeResult<bool> {
        Ok(self.0)
    }
}

fn project() -> MemoryFilesystem {
    MemoryFilesystem::new().with_file("pubspec.yaml", PUBSPEC)
}

fn scaffolder(fs: &MemoryFilesystem) -> ScaffoldService {
    let fs: Arc<MemoryFilesystem> = Arc::new(fs.clone());
    ScaffoldService::new(
        fs.clone(),
        Arc::new(PubspecManifest::new(fs)),
        ProjectPaths::default(),
    )
}

// ── scaffolding ───────────────────────────────────────────────────────────────

#[test]
fn scaffold_writes_layout_and_registers_the_feature() {
    let fs = project().with_file("lib/core/di/service_locator.dart", SERVICE_LOCATOR);

    let report = scaffolder(&fs)
        .scaffold("Order_History", ScaffoldOptions::default())
        .unwrap();

    assert_eq!(report.project, "shop");
    assert_eq!(report.feature.as_str(), "order_history");

    let root = Path::new("lib/features/order_history");
    for dir in FEATURE_DIRECTORIES {
        assert!(fs.exists(&root.join(dir)), "missing {dir}");
    }
    let generated: Vec<PathBuf> = fs
        .file_paths()
        .into_iter()
        .filter(|p| p.starts_with(root))
        .collect();
    assert_eq!(generated.len(), FEATURE_FILES.len());

    let presenter = fs
        .read_file(&root.join("presentation/presenter/order_history_presenter.dart"))
        .unwrap();
    assert!(presenter.contains("OrderHistory"));
    assert!(!presenter.contains("{{"));

    let locator = fs
        .read_file(Path::new("lib/core/di/service_locator.dart"))
        .unwrap();
    assert!(locator.contains("import 'package:shop/features/order_history/di/order_history_di.dart';"));
    assert!(locator.contains("//Feature DI setup"));
    assert!(locator.contains("await OrderHistoryDi.setup(_serviceLocator);"));
    assert!(matches!(report.bootstrap, BootstrapOutcome::Patched { .. }));
}

#[test]
fn scaffold_twice_with_force_leaves_the_locator_alone() {
    let fs = project().with_file("lib/core/di/service_locator.dart", SERVICE_LOCATOR);
    let service = scaffolder(&fs);

    service.scaffold("cart", ScaffoldOptions::default()).unwrap();
    let first = fs.read_file(Path::new("lib/core/di/service_locator.dart"));

    let again = service
        .scaffold(
            "cart",
            ScaffoldOptions {
                force: true,
                dry_run: false,
            },
        )
        .unwrap();

    assert!(matches!(again.bootstrap, BootstrapOutcome::Unchanged { .. }));
    assert_eq!(fs.read_file(Path::new("lib/core/di/service_locator.dart")), first);
}

#[test]
fn failed_write_rolls_back_the_new_feature() {
    let fs = project().with_read_only("lib/features/cart/presentation");

    let result = scaffolder(&fs).scaffold("cart", ScaffoldOptions::default());

    assert!(result.is_err());
    assert!(!fs.exists(Path::new("lib/features/cart")));
    assert!(
        fs.file_paths()
            .iter()
            .all(|p| !p.starts_with("lib/features"))
    );
}

#[test]
fn dry_run_reports_without_writing() {
    let fs = project().with_file("lib/core/di/service_locator.dart", SERVICE_LOCATOR);

    let report = scaffolder(&fs)
        .scaffold(
            "cart",
            ScaffoldOptions {
                force: false,
                dry_run: true,
            },
        )
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.structure.files().count(), FEATURE_FILES.len());
    assert!(!fs.exists(Path::new("lib/features/cart")));
    assert_eq!(
        fs.read_file(Path::new("lib/core/di/service_locator.dart"))
            .as_deref(),
        Some(SERVICE_LOCATOR)
    );
}

// ── build recipes ─────────────────────────────────────────────────────────────

#[test]
fn apk_recipe_keeps_going_and_reports_sizes() {
    let fs = project().with_file(
        "build/app/outputs/flutter-apk/app-release.apk",
        "x".repeat(2048),
    );
    let runner = Arc::new(ScriptedRunner::new().fail_when("build_runner"));

    let report = BuildService::new(
        runner.clone(),
        Arc::new(fs.clone()),
        Arc::new(NoDesktop),
        Toolchain::default(),
        ProjectPaths::default(),
    )
    .run(BuildRecipe::Apk)
    .unwrap();

    assert_eq!(runner.calls().len(), 4);
    assert!(!report.succeeded());
    assert_eq!(
        report.sequence.first_failure().map(|r| r.status),
        Some(StepStatus::Failed)
    );

    let artifacts = report.artifacts.unwrap();
    assert_eq!(artifacts.kind, ArtifactKind::Apk);
    assert_eq!(artifacts.files.len(), 1);
    assert_eq!(artifacts.files[0].size, 2048);
    assert!(matches!(
        report.output_dir,
        Some(OutputDirOutcome::Unsupported(_))
    ));
    assert!(fs.exists(Path::new("build/app/outputs/bundle/release")));
}

#[test]
fn pods_drop_the_lock_file_and_run_in_ios() {
    let fs = project().with_file("ios/Podfile.lock", "PODS: []");
    let runner = Arc::new(ScriptedRunner::new());

    let report = BuildService::new(
        runner.clone(),
        Arc::new(fs.clone()),
        Arc::new(NoDesktop),
        Toolchain::default(),
        ProjectPaths::default(),
    )
    .run(BuildRecipe::Pods)
    .unwrap();

    assert!(report.succeeded());
    assert_eq!(report.removed, vec![PathBuf::from("ios/Podfile.lock")]);
    assert!(!fs.exists(Path::new("ios/Podfile.lock")));
    assert_eq!(runner.calls(), ["pod repo update", "pod install"]);
}

#[test]
fn missing_program_is_reported_per_step() {
    let runner = Arc::new(ScriptedRunner::new().without_program("flutter"));

    let report = BuildService::new(
        runner,
        Arc::new(project()),
        Arc::new(NoDesktop),
        Toolchain::default(),
        ProjectPaths::default(),
    )
    .run(BuildRecipe::Cleanup)
    .unwrap();

    assert_eq!(report.sequence.ran(), 2);
    assert!(
        report
            .sequence
            .results()
            .iter()
            .all(|r| r.status == StepStatus::Missing)
    );
}

// ── install ───────────────────────────────────────────────────────────────────

#[test]
fn failed_install_uninstalls_once_and_retries_once() {
    let fs = project()
        .with_file("build/app/outputs/flutter-apk/app-armeabi-v7a-release.apk", "a")
        .with_file("build/app/outputs/flutter-apk/app-arm64-v8a-release.apk", "b")
        .with_file(
            "android/app/build.gradle",
            "android {\n    defaultConfig {\n        applicationId \"com.example.shop\"\n    }\n}\n",
        );
    let runner = Arc::new(ScriptedRunner::new().fail_when("adb install"));

    let outcome = InstallService::new(
        runner.clone(),
        Arc::new(fs),
        Toolchain::default(),
        ProjectPaths::default(),
        None,
    )
    .install()
    .unwrap();

    let apk = PathBuf::from("build/app/outputs/flutter-apk/app-arm64-v8a-release.apk");
    assert_eq!(outcome, InstallOutcome::Failed { apk: apk.clone() });
    assert_eq!(
        runner.calls(),
        [
            format!("adb install -r {}", apk.display()),
            "adb uninstall com.example.shop".to_string(),
            format!("adb install -r {}", apk.display()),
        ]
    );
}

#[test]
fn install_without_apk_runs_nothing() {
    let runner = Arc::new(ScriptedRunner::new());
    let outcome = InstallService::new(
        runner.clone(),
        Arc::new(project()),
        Toolchain::default(),
        ProjectPaths::default(),
        Some("com.example.shop".into()),
    )
    .install()
    .unwrap();

    assert_eq!(outcome, InstallOutcome::NoArtifact);
    assert!(runner.calls().is_empty());
}

#[test]
fn install_without_application_id_retries_without_uninstalling() {
    let fs = project().with_file("build/app/outputs/flutter-apk/app-release.apk", "a");
    let runner = Arc::new(ScriptedRunner::new().fail_when("adb install"));

    let outcome = InstallService::new(
        runner.clone(),
        Arc::new(fs),
        Toolchain::default(),
        ProjectPaths::default(),
        None,
    )
    .install()
    .unwrap();

    let apk = PathBuf::from("build/app/outputs/flutter-apk/app-release.apk");
    assert_eq!(outcome, InstallOutcome::Failed { apk: apk.clone() });
    let install = format!("adb install -r {}", apk.display());
    assert_eq!(runner.calls(), [install.clone(), install]);
}

// ── tag ───────────────────────────────────────────────────────────────────────

fn tagger(runner: Arc<ScriptedRunner>, answer: bool) -> TagService {
    let fs: Arc<MemoryFilesystem> = Arc::new(project());
    TagService::new(
        runner,
        Arc::new(PubspecManifest::new(fs)),
        Arc::new(Answer(answer)),
        Toolchain::default(),
        ProjectPaths::default(),
    )
}

#[test]
fn new_tag_strips_build_metadata() {
    // rev-parse "fails": the tag does not exist yet.
    let runner = Arc::new(ScriptedRunner::new().fail_when("rev-parse"));

    let outcome = tagger(runner.clone(), false).run(false).unwrap();

    assert!(matches!(
        outcome,
        TagOutcome::Pushed { ref tag, recreated: false } if tag.as_str() == "v2.1.0"
    ));
    assert_eq!(
        runner.calls()[1..],
        [
            "git tag -a v2.1.0 -m Release v2.1.0",
            "git push origin v2.1.0"
        ]
    );
}

#[test]
fn existing_tag_is_recreated_when_confirmed() {
    let runner = Arc::new(ScriptedRunner::new());

    let outcome = tagger(runner.clone(), true).run(false).unwrap();

    assert!(matches!(outcome, TagOutcome::Pushed { recreated: true, .. }));
    assert_eq!(runner.calls()[1], "git tag -d v2.1.0");
    assert_eq!(runner.calls()[3], "git push origin v2.1.0 --force");
}

#[test]
fn existing_tag_is_kept_when_declined() {
    let runner = Arc::new(ScriptedRunner::new());

    let outcome = tagger(runner.clone(), false).run(false).unwrap();

    assert!(matches!(outcome, TagOutcome::Declined { .. }));
    assert_eq!(runner.calls().len(), 1);
}
