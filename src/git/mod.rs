//! Version-control gateway
//!
//! This module provides a trait-based abstraction over the narrow set of
//! repository operations a build cut needs: a cleanliness check, staging,
//! committing, annotated tagging, pushing a tag, and reading history since a
//! previous tag.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording implementation for testing
//!
//! Code should depend on [RepositoryGateway] rather than a concrete
//! implementation so the workflow can run against fakes.
//!
//! ```rust
//! # use build_cut::git::RepositoryGateway;
//! # fn example<R: RepositoryGateway>(repo: &R) -> build_cut::Result<()> {
//! let status = repo.working_tree_status()?;
//! if status.is_clean() {
//!     let commits = repo.log_since(Some("releases/v1.0_1"), "HEAD")?;
//!     println!("{} new commits", commits.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GatewayCall, MockRepository};
pub use repository::Git2Repository;

use std::fmt;
use std::path::Path;

use crate::domain::{LogEntry, TagHandle};
use crate::error::Result;

/// How a path differs, using the one-letter codes of `git diff --name-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    TypeChanged,
}

impl ChangeKind {
    pub fn code(&self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
            ChangeKind::Renamed => 'R',
            ChangeKind::TypeChanged => 'T',
        }
    }
}

/// A single changed path in the working tree or index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPath {
    pub kind: ChangeKind,
    pub path: String,
}

impl ChangedPath {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        ChangedPath {
            kind,
            path: path.into(),
        }
    }
}

impl fmt::Display for ChangedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.kind.code(), self.path)
    }
}

/// The two independent dirty flags of a repository, with the paths behind them.
///
/// Untracked files and submodules are not considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    /// Modifications in the working tree that are not staged
    pub unstaged: Vec<ChangedPath>,
    /// Changes staged in the index but not committed
    pub staged: Vec<ChangedPath>,
}

impl WorkingTreeStatus {
    pub fn is_clean(&self) -> bool {
        self.unstaged.is_empty() && self.staged.is_empty()
    }

    /// One-line description, e.g. "1 unstaged, 2 staged"
    pub fn summary(&self) -> String {
        format!(
            "{} unstaged, {} staged",
            self.unstaged.len(),
            self.staged.len()
        )
    }
}

/// Repository operations needed by a build cut
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying failures onto the matching [crate::error::BuildCutError]
/// variant (`PathNotFound`, `NothingToCommit`, `TagAlreadyExists`,
/// `UnknownRevision`, `NetworkError`, `RemoteRejected`).
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real implementation using `git2`
/// - [MockRepository](mock::MockRepository): Test implementation recording each call
pub trait RepositoryGateway {
    /// Root of the working tree; relative paths passed to
    /// [stage](RepositoryGateway::stage) are resolved against it
    fn workdir(&self) -> &Path;

    /// Refresh the index and report unstaged and staged changes
    ///
    /// # Returns
    /// * `Ok(WorkingTreeStatus)` - Both change lists; clean when both are empty
    /// * `Err` - If the repository cannot be inspected
    fn working_tree_status(&self) -> Result<WorkingTreeStatus>;

    /// Convenience wrapper over [working_tree_status](RepositoryGateway::working_tree_status)
    fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.working_tree_status()?.is_clean())
    }

    /// Mark a path (relative to the working tree) for the next commit
    ///
    /// # Returns
    /// * `Err(PathNotFound)` - If the path does not exist
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit everything staged plus modifications to tracked files
    ///
    /// # Returns
    /// * `Ok(String)` - Object id of the new commit
    /// * `Err(NothingToCommit)` - If the resulting tree equals HEAD's
    /// * `Err(CommitFailed)` - If the commit cannot be written
    fn commit_all(&self, message: &str) -> Result<String>;

    /// Create an annotated tag on HEAD
    ///
    /// # Returns
    /// * `Ok(TagHandle)` - The created tag
    /// * `Err(TagAlreadyExists)` - If the name is taken
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<TagHandle>;

    /// Push a tag to the named remote
    ///
    /// # Returns
    /// * `Err(NetworkError)` - If the remote cannot be reached
    /// * `Err(RemoteRejected)` - If the remote refuses the update
    fn push_tag(&self, tag: &TagHandle, remote: &str) -> Result<()>;

    /// Commits after `from` up to and including `to`, oldest first
    ///
    /// `from` of `None` means the whole history reachable from `to`.
    ///
    /// # Returns
    /// * `Ok(Vec<LogEntry>)` - Commits in chronological order (oldest first)
    /// * `Err(UnknownRevision)` - If `from` (or `to`) does not resolve
    fn log_since(&self, from: Option<&str>, to: &str) -> Result<Vec<LogEntry>>;

    /// Look up an existing tag by short name
    ///
    /// # Returns
    /// * `Ok(Some(TagHandle))` - The tag and the commit it points at
    /// * `Ok(None)` - If no such tag exists
    fn find_tag(&self, name: &str) -> Result<Option<TagHandle>>;

    /// Whether a tag with this name exists
    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.find_tag(name)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status_is_clean() {
        assert!(WorkingTreeStatus::default().is_clean());
    }

    #[test]
    fn test_either_list_makes_status_dirty() {
        let unstaged = WorkingTreeStatus {
            unstaged: vec![ChangedPath::new(ChangeKind::Modified, "README.md")],
            staged: vec![],
        };
        let staged = WorkingTreeStatus {
            unstaged: vec![],
            staged: vec![ChangedPath::new(ChangeKind::Added, "new.txt")],
        };
        assert!(!unstaged.is_clean());
        assert!(!staged.is_clean());
        assert_eq!(unstaged.summary(), "1 unstaged, 0 staged");
    }

    #[test]
    fn test_changed_path_display_matches_name_status() {
        let path = ChangedPath::new(ChangeKind::Deleted, "src/old.rs");
        assert_eq!(path.to_string(), "D\tsrc/old.rs");
    }
}
