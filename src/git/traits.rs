//! git::traits
//!
//! The version-control contract consumed by the commit workflow.
//!
//! # Design
//!
//! The workflow needs exactly three things from version control: one status
//! query, staging of a path list, and recording a commit. [`Git`] implements
//! them over git2; [`MockVersionControl`] records calls for tests.
//!
//! The trait is `?Send`: a workflow runs on a single thread and `git2`
//! repositories are not `Sync`.
//!
//! [`Git`]: super::Git
//! [`MockVersionControl`]: super::mock::MockVersionControl

use async_trait::async_trait;

use super::GitError;
use crate::core::types::{Oid, StatusSnapshot};

/// Version-control operations required by the commit workflow.
#[async_trait(?Send)]
pub trait VersionControl {
    /// Query the working-tree status once.
    async fn status(&self) -> Result<StatusSnapshot, GitError>;

    /// Add `paths` to the index.
    async fn stage(&self, paths: &[String]) -> Result<(), GitError>;

    /// Record the index as a commit with `message`.
    async fn commit(&self, message: &str) -> Result<Oid, GitError>;
}
