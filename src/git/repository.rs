use std::cell::RefCell;
use std::path::{Path, PathBuf};

use git2::{
    Commit, ErrorClass, ErrorCode, ObjectType, Oid, Repository as Git2Repo, Sort, Status,
    StatusOptions,
};

use crate::domain::{LogEntry, TagHandle};
use crate::error::{BuildCutError, Result};
use crate::git::{ChangeKind, ChangedPath, RepositoryGateway, WorkingTreeStatus};

/// Wrapper around git2::Repository with our gateway interface
pub struct Git2Repository {
    repo: Git2Repo,
    workdir: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| BuildCutError::config("bare repositories have no working tree"))?
            .to_path_buf();

        Ok(Git2Repository { repo, workdir })
    }

    fn resolve_commit(&self, spec: &str) -> Result<Commit<'_>> {
        let object = self.repo.revparse_single(spec).map_err(|e| match e.code() {
            ErrorCode::NotFound
            | ErrorCode::InvalidSpec
            | ErrorCode::Ambiguous
            | ErrorCode::UnbornBranch => BuildCutError::UnknownRevision(spec.to_string()),
            _ => BuildCutError::Git(e),
        })?;

        Ok(object.peel_to_commit()?)
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.workdir).unwrap_or(path)
    }
}

/// Messages written by git's porcelain end with a newline
fn with_trailing_newline(message: &str) -> String {
    if message.ends_with('\n') {
        message.to_string()
    } else {
        format!("{}\n", message)
    }
}

/// Failures to reach the remote at all, as opposed to a refused update.
///
/// libgit2 reports refused connections and failed name resolution with the
/// `Os` class.
fn is_network_failure(e: &git2::Error) -> bool {
    matches!(
        e.class(),
        ErrorClass::Net | ErrorClass::Os | ErrorClass::Ssh | ErrorClass::Http | ErrorClass::Ssl
    )
}

fn staged_kind(status: Status) -> Option<ChangeKind> {
    if status.contains(Status::INDEX_NEW) {
        Some(ChangeKind::Added)
    } else if status.contains(Status::INDEX_MODIFIED) {
        Some(ChangeKind::Modified)
    } else if status.contains(Status::INDEX_DELETED) {
        Some(ChangeKind::Deleted)
    } else if status.contains(Status::INDEX_RENAMED) {
        Some(ChangeKind::Renamed)
    } else if status.contains(Status::INDEX_TYPECHANGE) {
        Some(ChangeKind::TypeChanged)
    } else {
        None
    }
}

// WT_NEW is an untracked file and never makes the tree dirty.
fn unstaged_kind(status: Status) -> Option<ChangeKind> {
    if status.contains(Status::WT_MODIFIED) {
        Some(ChangeKind::Modified)
    } else if status.contains(Status::WT_DELETED) {
        Some(ChangeKind::Deleted)
    } else if status.contains(Status::WT_RENAMED) {
        Some(ChangeKind::Renamed)
    } else if status.contains(Status::WT_TYPECHANGE) {
        Some(ChangeKind::TypeChanged)
    } else {
        None
    }
}

fn credentials(
    _url: &str,
    username_from_url: Option<&str>,
    allowed_types: git2::CredentialType,
) -> std::result::Result<git2::Cred, git2::Error> {
    let username = username_from_url.unwrap_or("git");

    if allowed_types.contains(git2::CredentialType::SSH_KEY) {
        if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
            return Ok(cred);
        }

        if let Some(home) = dirs::home_dir() {
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = home.join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }
    }

    git2::Cred::default()
}

impl RepositoryGateway for Git2Repository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn working_tree_status(&self) -> Result<WorkingTreeStatus> {
        // Pick up index changes made by other processes since we opened it.
        self.repo.index()?.read(false)?;

        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true)
            .update_index(true);

        let statuses = self.repo.statuses(Some(&mut options))?;

        let mut status = WorkingTreeStatus::default();
        for entry in statuses.iter() {
            let path = String::from_utf8_lossy(entry.path_bytes()).to_string();
            let flags = entry.status();

            if let Some(kind) = unstaged_kind(flags) {
                status.unstaged.push(ChangedPath::new(kind, path.clone()));
            }
            if let Some(kind) = staged_kind(flags) {
                status.staged.push(ChangedPath::new(kind, path));
            }
        }

        tracing::debug!(
            unstaged = status.unstaged.len(),
            staged = status.staged.len(),
            "working tree status"
        );
        Ok(status)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let relative = self.relative(path);
        if !self.workdir.join(relative).exists() {
            return Err(BuildCutError::PathNotFound(path.to_path_buf()));
        }

        let mut index = self.repo.index()?;
        index.add_path(relative)?;
        index.write()?;
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        // Like `git commit --all`: pick up modified and deleted tracked files.
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.head_commit()?;

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => tree.len() == 0,
        };
        if unchanged {
            return Err(BuildCutError::NothingToCommit);
        }

        let signature = self
            .repo
            .signature()
            .map_err(|e| BuildCutError::CommitFailed(format!("no committer identity: {}", e)))?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &with_trailing_newline(message),
                &tree,
                &parents,
            )
            .map_err(|e| BuildCutError::CommitFailed(e.message().to_string()))?;

        Ok(oid.to_string())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<TagHandle> {
        if self.tag_exists(name)? {
            return Err(BuildCutError::TagAlreadyExists(name.to_string()));
        }

        let head = self
            .head_commit()?
            .ok_or_else(|| BuildCutError::UnknownRevision("HEAD".to_string()))?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(
                name,
                head.as_object(),
                &signature,
                &with_trailing_newline(message),
                false,
            )
            .map_err(|e| match e.code() {
                ErrorCode::Exists => BuildCutError::TagAlreadyExists(name.to_string()),
                _ => BuildCutError::Git(e),
            })?;

        Ok(TagHandle::new(name, head.id().to_string()))
    }

    fn push_tag(&self, tag: &TagHandle, remote_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| BuildCutError::config(format!("No remote named '{}'", remote_name)))?;

        let rejected: RefCell<Option<String>> = RefCell::new(None);

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(credentials);
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                *rejected.borrow_mut() = Some(format!("{}: {}", refname, status));
            }
            Ok(())
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refname = tag.refname();
        let refspec = format!("{}:{}", refname, refname);
        tracing::debug!(remote = remote_name, %refspec, "pushing tag");

        if let Err(e) = remote.push(&[refspec.as_str()], Some(&mut push_options)) {
            return Err(if is_network_failure(&e) {
                BuildCutError::NetworkError(e.message().to_string())
            } else {
                BuildCutError::RemoteRejected(e.message().to_string())
            });
        }

        drop(push_options);
        match rejected.into_inner() {
            Some(reason) => Err(BuildCutError::RemoteRejected(reason)),
            None => Ok(()),
        }
    }

    fn log_since(&self, from: Option<&str>, to: &str) -> Result<Vec<LogEntry>> {
        let to_commit = self.resolve_commit(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_commit.id())?;

        if let Some(from) = from {
            let from_commit = self.resolve_commit(from)?;
            revwalk.hide(from_commit.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid: Oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let short_id = commit.as_object().short_id()?;

            // Subjects need not be UTF-8; keep them readable rather than drop them.
            commits.push(LogEntry::new(
                String::from_utf8_lossy(&short_id),
                String::from_utf8_lossy(commit.summary_bytes().unwrap_or_default()),
            ));
        }

        // Reverse to get chronological order (oldest first)
        commits.reverse();
        Ok(commits)
    }

    fn find_tag(&self, name: &str) -> Result<Option<TagHandle>> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => {
                // Tags may point at trees or blobs as well as commits.
                let target = match reference.peel_to_commit() {
                    Ok(commit) => commit.id(),
                    Err(_) => reference.peel(ObjectType::Any)?.id(),
                };
                Ok(Some(TagHandle::new(name, target.to_string())))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline_added_once() {
        assert_eq!(with_trailing_newline("msg"), "msg\n");
        assert_eq!(with_trailing_newline("msg\n"), "msg\n");
    }

    #[test]
    fn test_untracked_is_not_unstaged() {
        assert_eq!(unstaged_kind(Status::WT_NEW), None);
        assert_eq!(unstaged_kind(Status::WT_MODIFIED), Some(ChangeKind::Modified));
    }

    #[test]
    fn test_status_flags_split_by_category() {
        let flags = Status::INDEX_MODIFIED | Status::WT_DELETED;
        assert_eq!(staged_kind(flags), Some(ChangeKind::Modified));
        assert_eq!(unstaged_kind(flags), Some(ChangeKind::Deleted));
    }

    #[test]
    fn test_connection_failures_are_network_errors() {
        let refused = git2::Error::new(
            ErrorCode::GenericError,
            ErrorClass::Os,
            "failed to connect to 127.0.0.1: Connection refused",
        );
        let rejected = git2::Error::new(
            ErrorCode::GenericError,
            ErrorClass::Reference,
            "cannot push non-fastforwardable reference",
        );
        assert!(is_network_failure(&refused));
        assert!(!is_network_failure(&rejected));
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A fresh temp dir is normally outside any repository; if the temp
        // root itself is tracked, discovery may legitimately succeed.
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(Git2Repository::open(dir.path()).is_err());
        }
    }
}
