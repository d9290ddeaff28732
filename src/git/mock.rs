use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::domain::{LogEntry, TagHandle};
use crate::error::{BuildCutError, Result};
use crate::git::{RepositoryGateway, WorkingTreeStatus};

/// A call made against [MockRepository], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Status,
    Stage(PathBuf),
    CommitAll(String),
    CreateTag { name: String, message: String },
    PushTag { name: String, remote: String },
    LogSince { from: Option<String>, to: String },
}

impl GatewayCall {
    /// Whether this call changes repository state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            GatewayCall::Stage(_)
                | GatewayCall::CommitAll(_)
                | GatewayCall::CreateTag { .. }
                | GatewayCall::PushTag { .. }
        )
    }
}

/// Mock repository for testing without actual git operations
///
/// Files are still resolved against a real `workdir` so staging checks
/// that the path exists, but nothing is committed or tagged on disk.
pub struct MockRepository {
    workdir: PathBuf,
    status: WorkingTreeStatus,
    tags: RefCell<Vec<String>>,
    commits_since_tag: Vec<LogEntry>,
    history: Vec<LogEntry>,
    fail_commit: bool,
    calls: RefCell<Vec<GatewayCall>>,
}

impl MockRepository {
    /// Create a clean mock repository rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockRepository {
            workdir: workdir.into(),
            status: WorkingTreeStatus::default(),
            tags: RefCell::new(Vec::new()),
            commits_since_tag: Vec::new(),
            history: Vec::new(),
            fail_commit: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Report this status from the cleanliness check
    pub fn with_status(mut self, status: WorkingTreeStatus) -> Self {
        self.status = status;
        self
    }

    /// Add an existing tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.borrow_mut().push(name.into());
        self
    }

    /// Commits returned when logging since an existing tag
    pub fn with_commits_since_tag(mut self, commits: Vec<LogEntry>) -> Self {
        self.commits_since_tag = commits;
        self
    }

    /// Commits returned when logging the whole history
    pub fn with_history(mut self, commits: Vec<LogEntry>) -> Self {
        self.history = commits;
        self
    }

    /// Make every commit attempt fail
    pub fn with_failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    /// Calls that would have changed the repository
    pub fn mutations(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(GatewayCall::is_mutation)
            .collect()
    }

    /// Tags known to the mock, including ones created through it
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl RepositoryGateway for MockRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn working_tree_status(&self) -> Result<WorkingTreeStatus> {
        self.record(GatewayCall::Status);
        Ok(self.status.clone())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.record(GatewayCall::Stage(path.to_path_buf()));
        if !self.workdir.join(path).exists() {
            return Err(BuildCutError::PathNotFound(path.to_path_buf()));
        }
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        self.record(GatewayCall::CommitAll(message.to_string()));
        if self.fail_commit {
            return Err(BuildCutError::CommitFailed("mock commit failure".to_string()));
        }
        Ok(format!("{:040x}", self.calls.borrow().len()))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<TagHandle> {
        self.record(GatewayCall::CreateTag {
            name: name.to_string(),
            message: message.to_string(),
        });
        if self.tag_exists(name)? {
            return Err(BuildCutError::TagAlreadyExists(name.to_string()));
        }
        self.tags.borrow_mut().push(name.to_string());
        Ok(TagHandle::new(name, "0".repeat(40)))
    }

    fn push_tag(&self, tag: &TagHandle, remote: &str) -> Result<()> {
        self.record(GatewayCall::PushTag {
            name: tag.name.clone(),
            remote: remote.to_string(),
        });
        Ok(())
    }

    fn log_since(&self, from: Option<&str>, to: &str) -> Result<Vec<LogEntry>> {
        self.record(GatewayCall::LogSince {
            from: from.map(str::to_string),
            to: to.to_string(),
        });
        match from {
            Some(tag) if !self.tag_exists(tag)? => {
                Err(BuildCutError::UnknownRevision(tag.to_string()))
            }
            Some(_) => Ok(self.commits_since_tag.clone()),
            None => Ok(self.history.clone()),
        }
    }

    fn find_tag(&self, name: &str) -> Result<Option<TagHandle>> {
        let found = self.tags.borrow().iter().any(|t| t == name);
        Ok(found.then(|| TagHandle::new(name, "0".repeat(40))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{ChangeKind, ChangedPath};

    #[test]
    fn test_mock_repository_records_calls() {
        let repo = MockRepository::new("/tmp");
        repo.working_tree_status().unwrap();
        repo.commit_all("msg").unwrap();

        assert_eq!(
            repo.calls(),
            vec![GatewayCall::Status, GatewayCall::CommitAll("msg".to_string())]
        );
        assert_eq!(repo.mutations().len(), 1);
    }

    #[test]
    fn test_mock_repository_status() {
        let dirty = WorkingTreeStatus {
            unstaged: vec![ChangedPath::new(ChangeKind::Modified, "a.txt")],
            staged: vec![],
        };
        let repo = MockRepository::new("/tmp").with_status(dirty.clone());
        assert_eq!(repo.working_tree_status().unwrap(), dirty);
        assert!(!repo.is_working_tree_clean().unwrap());
    }

    #[test]
    fn test_mock_repository_tags() {
        let repo = MockRepository::new("/tmp").with_tag("releases/v1.0_1");

        assert!(repo.tag_exists("releases/v1.0_1").unwrap());
        assert!(!repo.tag_exists("releases/v1.0_2").unwrap());

        repo.create_annotated_tag("releases/v1.0_2", "m").unwrap();
        assert!(matches!(
            repo.create_annotated_tag("releases/v1.0_2", "m"),
            Err(BuildCutError::TagAlreadyExists(_))
        ));
    }

    #[test]
    fn test_mock_repository_log_since_unknown_tag() {
        let repo = MockRepository::new("/tmp")
            .with_history(vec![LogEntry::new("aaa", "first")]);

        assert!(matches!(
            repo.log_since(Some("releases/v0_0"), "HEAD"),
            Err(BuildCutError::UnknownRevision(_))
        ));
        assert_eq!(repo.log_since(None, "HEAD").unwrap().len(), 1);
    }

    #[test]
    fn test_mock_repository_stage_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path());
        assert!(matches!(
            repo.stage(Path::new("missing.mkd")),
            Err(BuildCutError::PathNotFound(_))
        ));
    }
}
