//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CommitType`] - Conventional-commit category token
//! - [`RenamedPath`] - A rename pair reported by the working-tree status
//! - [`StatusSnapshot`] - Immutable partition of the working-tree status
//! - [`IgnoreSet`] - Paths excluded from static analysis
//! - [`Oid`] - Git object identifier (SHA)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use lv_cli::core::types::{CommitType, Oid};
//!
//! let kind: CommitType = "fix".parse().unwrap();
//! assert_eq!(kind.compose("null check", "lv-commit"), "fix: null check (by lv-commit)");
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid commit type: {0}")]
    InvalidCommitType(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A conventional-commit type.
///
/// The order of [`CommitType::ALL`] is the order the selection menu is
/// presented in; `Feat` is the default choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CommitType {
    #[default]
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    Revert,
    Build,
}

impl CommitType {
    /// Every commit type, in menu order.
    pub const ALL: [CommitType; 10] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
        CommitType::Revert,
        CommitType::Build,
    ];

    /// The stable token written into commit messages.
    pub fn token(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
            CommitType::Build => "build",
        }
    }

    /// Human-readable label shown in the selection menu.
    pub fn label(self) -> &'static str {
        match self {
            CommitType::Feat => "feat: A new feature",
            CommitType::Fix => "fix: A bug fix",
            CommitType::Docs => "docs: Documentation only changes",
            CommitType::Style => "style: Formatting changes that do not affect behavior",
            CommitType::Refactor => "refactor: A change that neither adds a feature nor fixes a bug",
            CommitType::Perf => "perf: A performance improvement",
            CommitType::Test => "test: Adding or updating tests",
            CommitType::Chore => "chore: Build process or auxiliary tool changes",
            CommitType::Revert => "revert: Reverts a previous commit",
            CommitType::Build => "build: Packaging or build output changes",
        }
    }

    /// Position of this type in [`CommitType::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|t| *t == self)
            .unwrap_or_default()
    }

    /// Compose the final commit message.
    ///
    /// The format is `"{type}: {message} (by {tool})"`, with `message`
    /// used verbatim.
    pub fn compose(self, message: &str, tool: &str) -> String {
        format!("{}: {} (by {})", self.token(), message, tool)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CommitType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.token() == s)
            .ok_or_else(|| {
                TypeError::InvalidCommitType(format!(
                    "'{}', must be one of: {}",
                    s,
                    Self::ALL.map(CommitType::token).join(", ")
                ))
            })
    }
}

impl TryFrom<String> for CommitType {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CommitType> for String {
    fn from(value: CommitType) -> Self {
        value.token().to_string()
    }
}

/// A rename reported by the working-tree status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedPath {
    /// Path before the rename
    pub from: String,
    /// Path after the rename
    pub to: String,
}

impl RenamedPath {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Immutable partition of the working-tree status.
///
/// Produced once per workflow run and threaded through the later phases.
/// The five sets are disjoint and keep the order the status query returned.
/// Renames are projected to their destination path at construction, so a
/// rename source never appears in any set.
///
/// # Example
///
/// ```
/// use lv_cli::core::types::{IgnoreSet, RenamedPath, StatusSnapshot};
///
/// let status = StatusSnapshot::builder()
///     .not_added(["a.js", ".gitignore"])
///     .deleted(["gone.js"])
///     .renamed([RenamedPath::new("old.js", "new.js")])
///     .build();
///
/// let candidates = status.lint_candidates(&IgnoreSet::default());
/// assert_eq!(candidates, vec!["a.js", "new.js"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    not_added: Vec<String>,
    modified: Vec<String>,
    created: Vec<String>,
    deleted: Vec<String>,
    renamed: Vec<String>,
}

impl StatusSnapshot {
    /// Start building a snapshot.
    pub fn builder() -> StatusSnapshotBuilder {
        StatusSnapshotBuilder::default()
    }

    /// Untracked paths.
    pub fn not_added(&self) -> &[String] {
        &self.not_added
    }

    /// Modified tracked paths.
    pub fn modified(&self) -> &[String] {
        &self.modified
    }

    /// Paths newly added to the index.
    pub fn created(&self) -> &[String] {
        &self.created
    }

    /// Deleted paths.
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    /// Destination paths of renames.
    pub fn renamed(&self) -> &[String] {
        &self.renamed
    }

    /// The five sets in staging order, labelled.
    pub fn sets(&self) -> [(&'static str, &[String]); 5] {
        [
            ("not_added", &self.not_added),
            ("modified", &self.modified),
            ("created", &self.created),
            ("deleted", &self.deleted),
            ("renamed", &self.renamed),
        ]
    }

    /// Total number of paths across all sets.
    pub fn len(&self) -> usize {
        self.sets().iter().map(|(_, paths)| paths.len()).sum()
    }

    /// Whether the working tree has no pending changes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths to run static analysis over.
    ///
    /// `not_added ∪ modified ∪ created ∪ renamed`, minus `ignore`. Deleted
    /// paths are never included since there is no content left to analyze.
    pub fn lint_candidates(&self, ignore: &IgnoreSet) -> Vec<String> {
        self.not_added
            .iter()
            .chain(&self.modified)
            .chain(&self.created)
            .chain(&self.renamed)
            .filter(|path| !ignore.contains(path))
            .cloned()
            .collect()
    }

    /// One-line summary for terminal output.
    pub fn summary(&self) -> String {
        format!(
            "{} untracked, {} modified, {} created, {} deleted, {} renamed",
            self.not_added.len(),
            self.modified.len(),
            self.created.len(),
            self.deleted.len(),
            self.renamed.len()
        )
    }
}

/// Builder for [`StatusSnapshot`].
#[derive(Debug, Default)]
pub struct StatusSnapshotBuilder {
    inner: StatusSnapshot,
}

impl StatusSnapshotBuilder {
    pub fn not_added<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.not_added.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn modified<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.modified.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn created<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.created.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn deleted<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.deleted.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add renames; only the destination path is kept.
    pub fn renamed<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = RenamedPath>,
    {
        self.inner.renamed.extend(pairs.into_iter().map(|p| p.to));
        self
    }

    pub fn build(self) -> StatusSnapshot {
        self.inner
    }
}

/// Paths excluded from static analysis.
///
/// Matching is exact on the repository-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet(Vec<String>);

impl IgnoreSet {
    /// Repository metadata files excluded when nothing is configured.
    pub const DEFAULT: &'static [&'static str] = &[".gitignore", ".eslintignore"];

    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p == path)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(Self::DEFAULT.iter().copied())
    }
}

/// A Git object identifier.
///
/// Stored as lowercase hex, 40 characters (SHA-1) or 64 (SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(format!(
                "non-hex character in '{}'",
                oid
            )));
        }
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
