//! git::mock
//!
//! Mock version control for deterministic testing.
//!
//! # Design
//!
//! The mock returns a fixed [`StatusSnapshot`], records every stage and
//! commit call, and can be configured to fail a specific operation.
//!
//! # Example
//!
//! ```
//! use lv_cli::core::types::StatusSnapshot;
//! use lv_cli::git::mock::{MockOperation, MockVersionControl};
//! use lv_cli::git::VersionControl;
//!
//! # tokio_test::block_on(async {
//! let vcs = MockVersionControl::new(StatusSnapshot::builder().not_added(["a.js"]).build());
//!
//! vcs.stage(&["a.js".to_string()]).await.unwrap();
//! vcs.commit("fix: null check (by tool)").await.unwrap();
//!
//! assert_eq!(vcs.commits(), vec!["fix: null check (by tool)".to_string()]);
//! assert!(matches!(vcs.operations()[0], MockOperation::Status));
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::VersionControl;
use super::GitError;
use crate::core::types::{Oid, StatusSnapshot};

/// Mock version control for testing.
#[derive(Debug, Clone)]
pub struct MockVersionControl {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug)]
struct MockInner {
    status: StatusSnapshot,
    fail_on: Vec<FailOn>,
    operations: Vec<MockOperation>,
    next_commit: u64,
}

/// Which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail the status query.
    Status(GitError),
    /// Fail staging when the path list contains this path.
    StagePath(String, GitError),
    /// Fail the commit.
    Commit(GitError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Status,
    Stage { paths: Vec<String> },
    Commit { message: String },
}

impl MockVersionControl {
    /// Create a mock whose status query returns `status`.
    pub fn new(status: StatusSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                status,
                fail_on: Vec::new(),
                operations: Vec::new(),
                next_commit: 1,
            })),
        }
    }

    /// Configure an operation to fail.
    pub fn fail_on(self, fail: FailOn) -> Self {
        self.lock().fail_on.push(fail);
        self
    }

    /// All recorded operations, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Path lists passed to `stage`, in call order.
    pub fn staged(&self) -> Vec<Vec<String>> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::Stage { paths } => Some(paths.clone()),
                _ => None,
            })
            .collect()
    }

    /// Messages passed to `commit`, in call order.
    pub fn commits(&self) -> Vec<String> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::Commit { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether any stage or commit call was made.
    pub fn mutated(&self) -> bool {
        self.lock()
            .operations
            .iter()
            .any(|op| !matches!(op, MockOperation::Status))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        // A poisoned lock only happens after a panicking test; keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait(?Send)]
impl VersionControl for MockVersionControl {
    async fn status(&self) -> Result<StatusSnapshot, GitError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Status);
        for fail in &inner.fail_on {
            if let FailOn::Status(err) = fail {
                return Err(err.clone());
            }
        }
        Ok(inner.status.clone())
    }

    async fn stage(&self, paths: &[String]) -> Result<(), GitError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Stage {
            paths: paths.to_vec(),
        });
        for fail in &inner.fail_on {
            if let FailOn::StagePath(path, err) = fail {
                if paths.contains(path) {
                    return Err(err.clone());
                }
            }
        }
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<Oid, GitError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Commit {
            message: message.to_string(),
        });
        for fail in &inner.fail_on {
            if let FailOn::Commit(err) = fail {
                return Err(err.clone());
            }
        }
        let n = inner.next_commit;
        inner.next_commit += 1;
        Ok(Oid::new(format!("{:040x}", n))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_operations_in_order() {
        let vcs = MockVersionControl::new(StatusSnapshot::default());
        vcs.status().await.unwrap();
        vcs.stage(&["a.js".to_string()]).await.unwrap();
        vcs.commit("msg").await.unwrap();

        assert_eq!(
            vcs.operations(),
            vec![
                MockOperation::Status,
                MockOperation::Stage {
                    paths: vec!["a.js".to_string()]
                },
                MockOperation::Commit {
                    message: "msg".to_string()
                },
            ]
        );
        assert!(vcs.mutated());
    }

    #[tokio::test]
    async fn commit_ids_are_distinct() {
        let vcs = MockVersionControl::new(StatusSnapshot::default());
        let first = vcs.commit("one").await.unwrap();
        let second = vcs.commit("two").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn stage_failure_only_for_matching_path() {
        let vcs = MockVersionControl::new(StatusSnapshot::default()).fail_on(FailOn::StagePath(
            "bad.js".to_string(),
            GitError::Internal {
                message: "boom".to_string(),
            },
        ));

        assert!(vcs.stage(&["good.js".to_string()]).await.is_ok());
        assert!(vcs.stage(&["bad.js".to_string()]).await.is_err());
        assert_eq!(vcs.staged().len(), 2);
    }

    #[tokio::test]
    async fn status_failure() {
        let vcs = MockVersionControl::new(StatusSnapshot::default())
            .fail_on(FailOn::Status(GitError::BareRepo));
        assert!(matches!(vcs.status().await, Err(GitError::BareRepo)));
        assert!(!vcs.mutated());
    }
}
