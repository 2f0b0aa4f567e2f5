//! core::ops::lock
//!
//! Exclusive repository lock for lv operations.
//!
//! The commit workflow assumes exclusive access to the working tree and
//! index. Two `lv commit` invocations against the same repository are
//! serialized here: the second one fails fast instead of interleaving its
//! staging with the first.
//!
//! The lock is **repo-scoped** (`<common_dir>/lv/lock`), so it is shared by
//! every worktree of the repository.
//!
//! # Invariants
//!
//! - Lock is held for the entire workflow run
//! - Lock is released on drop (RAII)
//! - Acquisition is non-blocking
//!
//! # Example
//!
//! ```ignore
//! use lv_cli::core::ops::lock::RepoLock;
//!
//! let paths = LvPaths::from_repo_info(&git.info()?);
//! let lock = RepoLock::acquire(&paths)?;
//! // ... stage and commit ...
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::LvPaths;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("repository is locked by another lv process")]
    AlreadyLocked,

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),
}

/// An exclusive lock on the repository.
#[derive(Debug)]
pub struct RepoLock {
    /// Path to the lock file.
    path: PathBuf,
    /// Open handle with the OS lock held.
    file: File,
}

impl RepoLock {
    /// Attempt to acquire the repository lock.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(paths: &LvPaths) -> Result<Self, LockError> {
        let lv_dir = paths.repo_lv_dir();
        fs::create_dir_all(&lv_dir).map_err(|e| {
            LockError::CreateFailed(format!("cannot create {}: {}", lv_dir.display(), e))
        })?;

        let path = paths.repo_lock_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { path, file }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(LockError::AlreadyLocked),
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
