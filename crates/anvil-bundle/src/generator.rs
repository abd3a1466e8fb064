//! The bundle generator: plan, materialize, archive
//!
//! Steps run in a fixed order; a failure at any step aborts the rest and
//! cleans up whatever the session had already written, so callers never
//! see partial output alongside an error.

use crate::archive::{self, DEFAULT_COMPRESSION_LEVEL};
use crate::error::{Error, Result};
use crate::plan::{plan_bundle, BundlePlan};
use crate::session::{self, Session};
use anvil_core::TemplateRequest;
use anvil_store::{FragmentStore, RoleStore};
use std::path::PathBuf;

/// Generation steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Scaffold,
    OsDefaults,
    Requirements,
    HostsAndPlaybooks,
    GroupVars,
    Pipeline,
    Archive,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Scaffold => write!(f, "Directory scaffolding"),
            Step::OsDefaults => write!(f, "OS defaults generation"),
            Step::Requirements => write!(f, "Requirements template generation"),
            Step::HostsAndPlaybooks => write!(f, "Hosts and playbook generation"),
            Step::GroupVars => write!(f, "Group variables generation"),
            Step::Pipeline => write!(f, "Pipeline generation"),
            Step::Archive => write!(f, "Archive creation"),
        }
    }
}

/// Result of a successful generation run
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Session identifier, needed for cleanup
    pub session_id: String,

    /// Path of the bundle archive within the work directory
    pub archive_path: PathBuf,
}

/// Assembles deployment bundles from a template request and the
/// configuration store.
pub struct BundleGenerator<S> {
    store: S,
    work_dir: PathBuf,
    compression_level: u32,
}

impl<S: FragmentStore + RoleStore> BundleGenerator<S> {
    /// Create a generator writing sessions under `work_dir`.
    pub fn new(store: S, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            work_dir: work_dir.into(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the archive compression level.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.clamp(1, 9);
        self
    }

    /// Generate a bundle for a validated request.
    ///
    /// The whole tree is computed before anything touches the
    /// filesystem; store-lookup failures therefore abort before a
    /// session directory even exists.
    pub async fn generate(&self, request: &TemplateRequest) -> Result<GenerationOutput> {
        request.validate()?;

        let plan = plan_bundle(&self.store, request)?;
        tracing::debug!(files = plan.files.len(), "bundle plan computed");

        let session =
            Session::create(&self.work_dir).map_err(|e| Error::step(Step::Scaffold, e))?;
        tracing::info!(session_id = %session.id(), "generating bundle");

        match self.materialize(&session, &plan) {
            Ok(()) => Ok(GenerationOutput {
                session_id: session.id().to_string(),
                archive_path: session.archive_path(),
            }),
            Err(error) => {
                session.cleanup();
                Err(error)
            }
        }
    }

    /// Write the planned files into the session tree and archive it.
    fn materialize(&self, session: &Session, plan: &BundlePlan) -> Result<()> {
        let template_dir = session.template_dir();

        for file in &plan.files {
            let path = template_dir.join(&file.rel_path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::step(file.step, e))?;
            }
            std::fs::write(&path, &file.content).map_err(|e| Error::step(file.step, e))?;
        }

        archive::write_archive(
            &template_dir,
            &session.archive_path(),
            self.compression_level,
        )
        .map_err(|e| Error::step(Step::Archive, e))?;

        tracing::debug!(session_id = %session.id(), "bundle archived");
        Ok(())
    }

    /// Remove a session's working tree and archive. Idempotent; failures
    /// are logged, never surfaced.
    pub fn cleanup(&self, session_id: &str) {
        session::cleanup(&self.work_dir, session_id);
    }
}
