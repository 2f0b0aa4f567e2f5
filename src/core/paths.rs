//! core::paths
//!
//! Centralized path routing for lv storage locations.
//!
//! # Architecture
//!
//! All lv storage locations are computed here so that linked worktrees
//! share repo-scoped state with their parent repository. No code may assume
//! `.git/` is a directory or that `git_dir == common_dir`.
//!
//! # Storage Layout
//!
//! All lv data is stored under `<common_dir>/lv/`:
//! - `config.toml` - Repository configuration
//! - `lock` - Exclusive lock file
//!
//! # Example
//!
//! ```
//! use lv_cli::core::paths::LvPaths;
//! use std::path::PathBuf;
//!
//! let paths = LvPaths::new(
//!     PathBuf::from("/repo/.git"),
//!     PathBuf::from("/repo/.git"),
//! );
//!
//! assert_eq!(
//!     paths.repo_config_path(),
//!     PathBuf::from("/repo/.git/lv/config.toml")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::git::RepoInfo;

/// Centralized path routing for lv storage.
///
/// # Invariants
///
/// - All repo-scoped storage uses `common_dir` (shared across worktrees)
/// - No code outside this module should compute `*.join("lv")` paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LvPaths {
    /// Path to the per-worktree .git directory.
    pub git_dir: PathBuf,

    /// Path to the shared git directory (refs, objects, config).
    pub common_dir: PathBuf,
}

impl LvPaths {
    pub fn new(git_dir: PathBuf, common_dir: PathBuf) -> Self {
        Self {
            git_dir,
            common_dir,
        }
    }

    /// Create paths from an opened repository.
    pub fn from_repo_info(info: &RepoInfo) -> Self {
        Self {
            git_dir: info.git_dir.clone(),
            common_dir: info.common_dir.clone(),
        }
    }

    /// Root lv directory under `common_dir`.
    pub fn repo_lv_dir(&self) -> PathBuf {
        self.common_dir.join("lv")
    }

    /// `<common_dir>/lv/config.toml`
    pub fn repo_config_path(&self) -> PathBuf {
        self.repo_lv_dir().join("config.toml")
    }

    /// `<common_dir>/lv/lock`
    pub fn repo_lock_path(&self) -> PathBuf {
        self.repo_lv_dir().join("lock")
    }

    /// Check if this is a linked worktree (common_dir != git_dir).
    pub fn is_worktree(&self) -> bool {
        self.git_dir != self.common_dir
    }

    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }
}
