//! Tag Service - tags the manifest version and pushes it.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Confirmer, ManifestSource, ProcessRunner},
        services::sequencer::{SequenceReport, Sequencer},
    },
    domain::{FailurePolicy, ProjectPaths, ReleaseTag, Toolchain},
    error::FledgeResult,
};

pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Pushed { tag: ReleaseTag, recreated: bool },
    /// The tag already existed and the user chose to keep it.
    Declined { tag: ReleaseTag },
    Failed { tag: ReleaseTag, report: SequenceReport },
}

pub struct TagService {
    runner: Arc<dyn ProcessRunner>,
    manifests: Arc<dyn ManifestSource>,
    confirmer: Arc<dyn Confirmer>,
    toolchain: Toolchain,
    paths: ProjectPaths,
    remote: String,
}

impl TagService {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        manifests: Arc<dyn ManifestSource>,
        confirmer: Arc<dyn Confirmer>,
        toolchain: Toolchain,
        paths: ProjectPaths,
    ) -> Self {
        Self {
            runner,
            manifests,
            confirmer,
            toolchain,
            paths,
            remote: DEFAULT_REMOTE.into(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Create and push `v<version>`. With `assume_yes`, an existing tag is
    /// recreated without asking.
    #[instrument(skip(self))]
    pub fn run(&self, assume_yes: bool) -> FledgeResult<TagOutcome> {
        let manifest = self.manifests.load(&self.paths.manifest)?;
        let tag = manifest.release_tag()?;
        info!(%tag, "Release tag");

        let exists = self
            .runner
            .probe(&self.toolchain.git_tag_exists(tag.as_str()))?;

        if exists {
            let question = format!("Tag {tag} already exists. Delete and recreate it?");
            if !assume_yes && !self.confirmer.confirm(&question)? {
                info!(%tag, "Keeping existing tag");
                return Ok(TagOutcome::Declined { tag });
            }
        }

        let mut steps = Vec::with_capacity(3);
        if exists {
            steps.push(self.toolchain.git_tag_delete(tag.as_str()));
        }
        steps.push(self.toolchain.git_tag_create(tag.as_str()));
        steps.push(
            self.toolchain
                .git_push_tag(&self.remote, tag.as_str(), exists),
        );

        let report = Sequencer::new(self.runner.as_ref(), FailurePolicy::StopOnFailure).run(&steps);

        if report.all_succeeded() {
            Ok(TagOutcome::Pushed {
                tag,
                recreated: exists,
            })
        } else {
            Ok(TagOutcome::Failed { tag, report })
        }
    }
}
