//! lint::mock
//!
//! Mock linter for deterministic testing.
//!
//! # Example
//!
//! ```
//! use lv_cli::lint::mock::MockLinter;
//! use lv_cli::lint::Linter;
//!
//! # tokio_test::block_on(async {
//! let linter = MockLinter::with_report("1 problem (1 error, 0 warnings)");
//! let report = linter.lint(&["a.js".to_string()]).await.unwrap();
//!
//! assert!(!report.is_clean());
//! assert_eq!(linter.calls(), vec![vec!["a.js".to_string()]]);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{LintError, LintReport, Linter};

/// Mock linter returning a fixed report and recording file lists.
#[derive(Debug, Clone)]
pub struct MockLinter {
    inner: Arc<Mutex<MockLinterInner>>,
}

#[derive(Debug)]
struct MockLinterInner {
    result: Result<LintReport, LintError>,
    calls: Vec<Vec<String>>,
}

impl MockLinter {
    /// A linter that reports no findings.
    pub fn clean() -> Self {
        Self::with_result(Ok(LintReport::clean()))
    }

    /// A linter that returns `report` verbatim.
    pub fn with_report(report: impl Into<String>) -> Self {
        Self::with_result(Ok(LintReport::new(report)))
    }

    /// A linter that fails to run.
    pub fn failing(err: LintError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(result: Result<LintReport, LintError>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockLinterInner {
                result,
                calls: Vec::new(),
            })),
        }
    }

    /// File lists passed to `lint`, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockLinterInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait(?Send)]
impl Linter for MockLinter {
    async fn lint(&self, files: &[String]) -> Result<LintReport, LintError> {
        let mut inner = self.lock();
        inner.calls.push(files.to_vec());
        inner.result.clone()
    }
}
