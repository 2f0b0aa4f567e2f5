//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. All repository reads and
//! writes flow through this interface; no other module imports `git2`.
//! The commit workflow depends on the [`VersionControl`] trait rather than
//! on [`Git`] directly, so it can be driven by [`mock::MockVersionControl`]
//! in tests.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Working-tree status partitioning
//! - Staging paths and recording commits
//!
//! # Example
//!
//! ```ignore
//! use lv_cli::git::{Git, VersionControl};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let status = git.status().await?;
//! git.stage(status.not_added()).await?;
//! let oid = git.commit("feat: add parser (by lv-commit)").await?;
//! ```

mod interface;
pub mod mock;
mod traits;

pub use interface::{libgit2_version, Git, GitError, RepoInfo};
pub use traits::VersionControl;
