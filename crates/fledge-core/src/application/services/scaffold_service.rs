//! Scaffold Service - generates a feature and wires it into the app.
//!
//! This service coordinates the feature scaffolding workflow:
//! 1. Read the project manifest (nothing is written if that fails)
//! 2. Render the feature layout with the project and feature names
//! 3. Write to filesystem, rolling back on failure
//! 4. Best-effort patch of the service locator

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestSource},
    },
    domain::{
        BootstrapPatch, CallAnchor, FeatureLayout, FeatureName, FsEntry, ProjectPaths,
        ProjectStructure, RenderContext,
    },
    error::FledgeResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Write into an existing feature directory.
    pub force: bool,
    /// Compute everything, write nothing.
    pub dry_run: bool,
}

/// What happened to the service locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Patched {
        path: PathBuf,
        import_added: bool,
        anchor: CallAnchor,
    },
    /// Import and call were both there already.
    Unchanged { path: PathBuf },
    Missing { path: PathBuf },
    /// Neither the marker nor a setup call to follow was found.
    NoAnchor { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl BootstrapOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Patched { path, .. }
            | Self::Unchanged { path }
            | Self::Missing { path }
            | Self::NoAnchor { path }
            | Self::Failed { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project: String,
    pub feature: FeatureName,
    pub structure: ProjectStructure,
    pub dry_run: bool,
    pub bootstrap: BootstrapOutcome,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    manifests: Arc<dyn ManifestSource>,
    paths: ProjectPaths,
}

impl ScaffoldService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        manifests: Arc<dyn ManifestSource>,
        paths: ProjectPaths,
    ) -> Self {
        Self {
            filesystem,
            manifests,
            paths,
        }
    }

    /// Scaffold the feature `name`.
    #[instrument(skip(self), fields(feature = %name))]
    pub fn scaffold(&self, name: &str, options: ScaffoldOptions) -> FledgeResult<ScaffoldReport> {
        let manifest = self.manifests.load(&self.paths.manifest)?;
        let feature = FeatureName::parse(name)?;
        info!(project = manifest.name(), %feature, "Scaffolding feature");

        let context = RenderContext::for_feature(manifest.name(), &feature);
        let structure = FeatureLayout::render(&self.paths.features_root, &feature, &context)?;

        let existed = self.filesystem.exists(structure.root());
        if existed && !options.force {
            return Err(ApplicationError::FeatureExists {
                path: structure.root().to_path_buf(),
            }
            .into());
        }

        if !options.dry_run {
            self.write_structure(&structure, !existed)?;
        }

        let patch = BootstrapPatch::new(
            FeatureLayout::di_import(manifest.name(), &feature),
            FeatureLayout::di_setup_call(&feature),
        );
        let bootstrap = self.patch_bootstrap(&patch, options.dry_run);

        Ok(ScaffoldReport {
            project: manifest.name().to_string(),
            feature,
            structure,
            dry_run: options.dry_run,
            bootstrap,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure, owns_root: bool) -> FledgeResult<()> {
        match self.write_all(structure) {
            Ok(()) => {
                info!(entries = structure.entry_count(), "Wrote feature");
                Ok(())
            }
            Err(e) if owns_root => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> FledgeResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for entry in &structure.entries {
            let path = root.join(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(error = %e, path = %root.display(), "Rollback failed");
        } else {
            info!("Rollback successful");
        }
    }

    fn patch_bootstrap(&self, patch: &BootstrapPatch, dry_run: bool) -> BootstrapOutcome {
        let path = self.paths.service_locator.clone();

        let content = match self.filesystem.read_to_string(&path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                warn!(path = %path.display(), "Service locator not found, skipping DI setup");
                return BootstrapOutcome::Missing { path };
            }
            Err(e) => {
                return BootstrapOutcome::Failed {
                    path,
                    reason: e.to_string(),
                };
            }
        };

        let result = patch.apply(&content);
        match result.call_anchor {
            CallAnchor::NotFound => {
                warn!(path = %path.display(), "No place for the setup call");
                return BootstrapOutcome::NoAnchor { path };
            }
            _ if !result.changed() => return BootstrapOutcome::Unchanged { path },
            _ => {}
        }

        if !dry_run {
            if let Err(e) = self.filesystem.write_file(&path, &result.content) {
                warn!(error = %e, path = %path.display(), "Could not update service locator");
                return BootstrapOutcome::Failed {
                    path,
                    reason: e.to_string(),
                };
            }
        }

        BootstrapOutcome::Patched {
            path,
            import_added: result.import_added,
            anchor: result.call_anchor,
        }
    }
}
