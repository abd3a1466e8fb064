//! Session-scoped working directories
//!
//! Every generation run owns a fresh UUID-keyed directory under the work
//! directory, so concurrent runs never collide on working-tree paths. The
//! archive is written next to the session directory as `<id>.tar.gz`.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fixed root entry of every bundle archive
pub const TEMPLATE_ROOT: &str = "Ansible-Template";

/// One generation run's working context
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    work_dir: PathBuf,
}

impl Session {
    /// Create a session with a fresh identifier and scaffold its template
    /// directory.
    pub fn create(work_dir: &Path) -> std::io::Result<Self> {
        let session = Self {
            id: Uuid::new_v4().to_string(),
            work_dir: work_dir.to_path_buf(),
        };
        std::fs::create_dir_all(session.template_dir())?;
        tracing::debug!(session_id = %session.id, "scaffolded session directory");
        Ok(session)
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Root of the session's working tree
    pub fn root(&self) -> PathBuf {
        self.work_dir.join(&self.id)
    }

    /// Directory the bundle tree is written into
    pub fn template_dir(&self) -> PathBuf {
        self.root().join(TEMPLATE_ROOT)
    }

    /// Path the session's archive is written to
    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}.tar.gz", self.id))
    }

    /// Remove this session's working tree and archive
    pub fn cleanup(&self) {
        cleanup(&self.work_dir, &self.id);
    }
}

/// Remove a session's working tree and archive.
///
/// Idempotent: already-removed artifacts are not an error. Other failures
/// are logged and swallowed; by the time cleanup runs the primary
/// response has already been delivered.
pub fn cleanup(work_dir: &Path, session_id: &str) {
    let session_dir = work_dir.join(session_id);
    if let Err(error) = std::fs::remove_dir_all(&session_dir) {
        if error.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(%session_id, %error, "failed to remove session directory");
        }
    }

    let archive = work_dir.join(format!("{session_id}.tar.gz"));
    if let Err(error) = std::fs::remove_file(&archive) {
        if error.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(%session_id, %error, "failed to remove session archive");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_scaffolds_template_dir() {
        let work = TempDir::new().unwrap();
        let session = Session::create(work.path()).unwrap();

        assert!(session.template_dir().is_dir());
        assert!(session.template_dir().ends_with(TEMPLATE_ROOT));
        assert!(!session.id().is_empty());
    }

    #[test]
    fn test_sessions_do_not_collide() {
        let work = TempDir::new().unwrap();
        let first = Session::create(work.path()).unwrap();
        let second = Session::create(work.path()).unwrap();
        assert_ne!(first.root(), second.root());
    }

    #[test]
    fn test_cleanup_removes_tree_and_archive() {
        let work = TempDir::new().unwrap();
        let session = Session::create(work.path()).unwrap();
        std::fs::write(session.archive_path(), b"archive").unwrap();

        session.cleanup();
        assert!(!session.root().exists());
        assert!(!session.archive_path().exists());
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let work = TempDir::new().unwrap();
        let session = Session::create(work.path()).unwrap();
        session.cleanup();
        // Second call finds nothing to remove and must not panic
        session.cleanup();
        cleanup(work.path(), "never-existed");
    }
}
