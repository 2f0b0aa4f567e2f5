//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to Git in lv. It provides
//! structured results and normalizes errors into typed failure categories.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::Stage`]: A path could not be added to or removed from the index
//! - [`GitError::Signature`]: No committer identity is configured
//! - [`GitError::NothingToCommit`]: The index matches `HEAD`
//! - [`GitError::NonUtf8Path`]: A changed path cannot be represented as UTF-8
//!
//! # Example
//!
//! ```ignore
//! use lv_cli::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let status = git.status_snapshot()?;
//! println!("{}", status.summary());
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use super::traits::VersionControl;
use crate::core::types::{Oid, RenamedPath, StatusSnapshot, TypeError};

/// Errors from Git operations.
#[derive(Debug, Clone, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Reading the working-tree status failed.
    #[error("failed to read status: {message}")]
    Status { message: String },

    /// A path could not be staged.
    #[error("failed to stage '{path}': {message}")]
    Stage { path: String, message: String },

    /// No committer identity is configured.
    #[error("no committer identity configured (set user.name and user.email): {message}")]
    Signature { message: String },

    /// Writing the commit failed.
    #[error("failed to commit: {message}")]
    Commit { message: String },

    /// The index tree is identical to `HEAD`'s tree.
    #[error("nothing to commit, index matches HEAD")]
    NothingToCommit,

    /// A changed path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    /// Invalid object id returned by git.
    #[error("invalid object id: {oid}")]
    InvalidOid { oid: String },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError { message: String },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal { message: String },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::InvalidOid {
            oid: err.to_string(),
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to the per-worktree .git directory
    pub git_dir: PathBuf,
    /// Path to the shared .git directory
    pub common_dir: PathBuf,
    /// Path to the working directory
    pub work_dir: PathBuf,
}

/// The Git interface.
///
/// No other module imports `git2` directly.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open the repository containing `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Repository locations.
    pub fn info(&self) -> Result<RepoInfo, GitError> {
        Ok(RepoInfo {
            git_dir: self.repo.path().to_path_buf(),
            common_dir: self.repo.commondir().to_path_buf(),
            work_dir: self.work_dir()?.to_path_buf(),
        })
    }

    /// The working directory root.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Partition the working-tree status into a [`StatusSnapshot`].
    ///
    /// Each path lands in exactly one set, by priority:
    /// renamed → deleted → created → modified → not_added.
    /// Renames are reported by destination path only. Ignored files are
    /// skipped; untracked directories are expanded to their files.
    ///
    /// A path that is not valid UTF-8 is an error, never silently dropped.
    pub fn status_snapshot(&self) -> Result<StatusSnapshot, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::Status {
                message: e.message().to_string(),
            })?;

        let mut not_added = Vec::new();
        let mut modified = Vec::new();
        let mut created = Vec::new();
        let mut deleted = Vec::new();
        let mut renamed = Vec::new();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_ignored() {
                continue;
            }

            if status.is_index_renamed() {
                renamed.push(rename_pair(&entry)?);
                continue;
            }

            let path = utf8_path(entry.path_bytes())?;

            if status.is_index_deleted() || status.is_wt_deleted() {
                deleted.push(path);
            } else if status.is_index_new() {
                created.push(path);
            } else if status.is_index_modified()
                || status.is_wt_modified()
                || status.is_index_typechange()
                || status.is_wt_typechange()
                || status.is_conflicted()
            {
                modified.push(path);
            } else if status.is_wt_new() {
                not_added.push(path);
            }
        }

        Ok(StatusSnapshot::builder()
            .not_added(not_added)
            .modified(modified)
            .created(created)
            .deleted(deleted)
            .renamed(renamed)
            .build())
    }

    // =========================================================================
    // Index and Commit
    // =========================================================================

    /// Stage `paths` (relative to the working directory).
    ///
    /// Paths that exist are added; paths that no longer exist are removed
    /// from the index. The index is written only if every path succeeded.
    pub fn stage_paths(&self, paths: &[String]) -> Result<(), GitError> {
        let work_dir = self.work_dir()?;
        let mut index = self
            .repo
            .index()
            .map_err(|e| GitError::from_git2(e, "index"))?;
        index
            .read(false)
            .map_err(|e| GitError::from_git2(e, "index"))?;

        for path in paths {
            let rel = Path::new(path);
            let result = if work_dir.join(rel).symlink_metadata().is_ok() {
                index.add_path(rel)
            } else {
                index.remove_path(rel)
            };
            result.map_err(|e| GitError::Stage {
                path: path.clone(),
                message: e.message().to_string(),
            })?;
        }

        index
            .write()
            .map_err(|e| GitError::from_git2(e, "index write"))?;
        Ok(())
    }

    /// Record the current index as a commit on `HEAD`.
    ///
    /// An unborn `HEAD` produces a root commit. An index identical to
    /// `HEAD`'s tree is refused with [`GitError::NothingToCommit`].
    pub fn commit_index(&self, message: &str) -> Result<Oid, GitError> {
        let mut index = self
            .repo
            .index()
            .map_err(|e| GitError::from_git2(e, "index"))?;
        index
            .read(false)
            .map_err(|e| GitError::from_git2(e, "index"))?;

        let tree_id = index.write_tree().map_err(|e| GitError::Commit {
            message: e.message().to_string(),
        })?;
        let tree = self
            .repo
            .find_tree(tree_id)
            .map_err(|e| GitError::from_git2(e, "tree"))?;

        let signature = self.repo.signature().map_err(|e| GitError::Signature {
            message: e.message().to_string(),
        })?;

        let parent = match self.repo.head() {
            Ok(head) => Some(
                head.peel_to_commit()
                    .map_err(|e| GitError::from_git2(e, "HEAD"))?,
            ),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };
        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Err(GitError::NothingToCommit);
            }
        }
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .map_err(|e| GitError::Commit {
                message: e.message().to_string(),
            })?;

        Ok(Oid::new(oid.to_string())?)
    }
}

#[async_trait(?Send)]
impl VersionControl for Git {
    async fn status(&self) -> Result<StatusSnapshot, GitError> {
        self.status_snapshot()
    }

    async fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        self.stage_paths(paths)
    }

    async fn commit(&self, message: &str) -> Result<Oid, GitError> {
        self.commit_index(message)
    }
}

/// Version of the linked libgit2 as `(major, minor, patch)`.
pub fn libgit2_version() -> (u32, u32, u32) {
    git2::Version::get().libgit2_version()
}

/// Build the rename pair for a staged rename.
///
/// Unstaged renames are not paired: they show up as a deleted source plus
/// an untracked destination, so staging both sides records the move.
fn rename_pair(entry: &git2::StatusEntry<'_>) -> Result<RenamedPath, GitError> {
    let delta = entry.head_to_index().ok_or_else(|| GitError::Status {
        message: format!(
            "rename of '{}' has no index delta",
            String::from_utf8_lossy(entry.path_bytes())
        ),
    })?;
    let from = diff_path(delta.old_file())?;
    let to = diff_path(delta.new_file())?;
    Ok(RenamedPath { from, to })
}

fn diff_path(file: git2::DiffFile<'_>) -> Result<String, GitError> {
    let bytes = file.path_bytes().ok_or_else(|| GitError::Status {
        message: "rename entry without a path".to_string(),
    })?;
    utf8_path(bytes)
}

fn utf8_path(bytes: &[u8]) -> Result<String, GitError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| GitError::NonUtf8Path {
            path: String::from_utf8_lossy(bytes).into_owned(),
        })
}
