//! The build-cut workflow
//!
//! Cutting a build is one linear, fail-fast sequence:
//!
//! ```text
//! Start → Validated → VersionBumped → PlistUpdated? → NotesWritten
//!       → NotesStaged → Committed → Tagged → Done
//! ```
//!
//! The cleanliness check is the only gate and runs before anything is
//! mutated. After it passes, a failing step halts the workflow where it
//! stands. Completed steps are not undone: once the build number has been
//! bumped, rerunning bumps it again. Pushing the tag is a separate,
//! operator-triggered step.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::config::BuildSettings;
use crate::domain::{self, LogEntry, TagHandle};
use crate::error::{BuildCutError, Result};
use crate::git::RepositoryGateway;
use crate::store::VersionStore;
use crate::tools::{Clipboard, PlistEditor};
use crate::ui;

/// Ref that release notes are collected up to
const HEAD: &str = "HEAD";

/// States of a build cut, in the order they are reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    Start,
    Validated,
    VersionBumped,
    PlistUpdated,
    NotesWritten,
    NotesStaged,
    Committed,
    Tagged,
    Done,
}

impl BuildStage {
    /// Whether the version store has already been mutated at this stage
    pub fn build_number_advanced(&self) -> bool {
        *self >= BuildStage::VersionBumped
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Start => "start",
            BuildStage::Validated => "validated",
            BuildStage::VersionBumped => "version bumped",
            BuildStage::PlistUpdated => "plist updated",
            BuildStage::NotesWritten => "notes written",
            BuildStage::NotesStaged => "notes staged",
            BuildStage::Committed => "committed",
            BuildStage::Tagged => "tagged",
            BuildStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a completed build cut
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    /// Canonical version string of the new build
    pub version: String,
    /// The annotated release tag
    pub tag: TagHandle,
    /// Release notes path, relative to the repository root
    pub notes_path: PathBuf,
    /// Number of commits in the release notes
    pub commit_count: usize,
    pub previous_tag: Option<String>,
    pub plist_updated: bool,
    pub copied_to_clipboard: bool,
    pub warnings: Vec<BoundaryWarning>,
}

/// What `make-build` would do, computed without mutating anything
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPreview {
    /// Canonical version before the bump
    pub current_version: String,
    pub previous_tag: Option<String>,
    /// Commits that would appear in the release notes
    pub commits: Vec<LogEntry>,
    pub settings_plist: Option<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Sequences the version store, repository and side-effect tools into one
/// build cut.
pub struct BuildCutWorkflow<'a> {
    store: &'a dyn VersionStore,
    repo: &'a dyn RepositoryGateway,
    plist: &'a dyn PlistEditor,
    clipboard: &'a dyn Clipboard,
    settings: BuildSettings,
}

impl<'a> BuildCutWorkflow<'a> {
    pub fn new(
        store: &'a dyn VersionStore,
        repo: &'a dyn RepositoryGateway,
        plist: &'a dyn PlistEditor,
        clipboard: &'a dyn Clipboard,
        settings: BuildSettings,
    ) -> Self {
        BuildCutWorkflow {
            store,
            repo,
            plist,
            clipboard,
            settings,
        }
    }

    /// Tag implied by the current (pre-bump) version, if the store answers.
    ///
    /// This assumes the current build was itself tagged. When it was not,
    /// the tag will not resolve and the notes fall back to full history.
    pub fn default_previous_tag(&self) -> Option<String> {
        match self.store.canonical_version() {
            Ok(version) => Some(domain::tag_name_for(&version)),
            Err(e) => {
                tracing::debug!(error = %e, "cannot derive previous tag");
                None
            }
        }
    }

    /// Cut a build.
    ///
    /// # Arguments
    /// * `previous_tag` - Tag the release notes start after; `None` covers the
    ///   whole history
    ///
    /// # Returns
    /// * `Ok(BuildOutcome)` - The new version, tag, and notes file
    /// * `Err(DirtyWorkingTree)` - The tree is dirty; nothing was changed
    /// * `Err(Halted)` - A later step failed; `stage` is the last one completed
    pub fn run(&self, previous_tag: Option<&str>) -> Result<BuildOutcome> {
        let status = self.repo.working_tree_status()?;
        if !status.is_clean() {
            return Err(BuildCutError::DirtyWorkingTree(status));
        }

        let mut stage = BuildStage::Validated;
        let result = self.cut(previous_tag, &mut stage);
        result.map_err(|e| BuildCutError::halted(stage, e))
    }

    /// Run the cleanliness gate and report what a build would contain,
    /// without bumping, writing, committing or tagging.
    pub fn preview(&self, previous_tag: Option<&str>) -> Result<BuildPreview> {
        let status = self.repo.working_tree_status()?;
        if !status.is_clean() {
            return Err(BuildCutError::DirtyWorkingTree(status));
        }

        let mut warnings = Vec::new();
        let current_version = self.store.canonical_version()?;
        let commits = self.collect_commits(previous_tag, &mut warnings)?;

        Ok(BuildPreview {
            current_version,
            previous_tag: previous_tag.map(str::to_string),
            commits,
            settings_plist: self.settings.settings_plist.clone(),
            warnings,
        })
    }

    fn cut(&self, previous_tag: Option<&str>, stage: &mut BuildStage) -> Result<BuildOutcome> {
        let mut warnings = Vec::new();

        self.store.bump_build_number()?;
        self.reached(stage, BuildStage::VersionBumped);
        let bumped = self.store.canonical_version()?;
        ui::display_status(&format!("Version changed to {}", bumped));

        let plist_updated = self.update_settings_plist(&bumped, &mut warnings);
        if plist_updated {
            self.reached(stage, BuildStage::PlistUpdated);
        }

        // Re-read so the notes always reflect the store as it is now.
        let version = domain::format(
            &self.store.marketing_version()?,
            &self.store.build_number()?,
        );
        let notes_path = domain::notes_path(
            &self.settings.notes_directory,
            &version,
            &self.settings.notes_extension,
        );
        let commits = self.collect_commits(previous_tag, &mut warnings)?;
        let notes = domain::render(&commits);

        let full_path = self.repo.workdir().join(&notes_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, &notes)?;
        self.reached(stage, BuildStage::NotesWritten);

        let copied_to_clipboard = self.copy_to_clipboard(&notes, &mut warnings);
        if copied_to_clipboard {
            ui::display_success(&format!(
                "{} generated and copied to clipboard",
                notes_path.display()
            ));
        } else {
            ui::display_success(&format!("{} generated", notes_path.display()));
        }

        self.repo.stage(&notes_path)?;
        self.reached(stage, BuildStage::NotesStaged);

        self.repo
            .commit_all(&format!("Automated build of {}", version))?;
        self.reached(stage, BuildStage::Committed);

        let tag = self.repo.create_annotated_tag(
            &domain::tag_name_for(&version),
            &format!("Automated tagging of version {}", version),
        )?;
        self.reached(stage, BuildStage::Tagged);

        self.reached(stage, BuildStage::Done);
        Ok(BuildOutcome {
            version,
            tag,
            notes_path,
            commit_count: commits.len(),
            previous_tag: previous_tag.map(str::to_string),
            plist_updated,
            copied_to_clipboard,
            warnings,
        })
    }

    fn reached(&self, stage: &mut BuildStage, next: BuildStage) {
        tracing::debug!(stage = %next, "build stage reached");
        *stage = next;
    }

    fn update_settings_plist(&self, version: &str, warnings: &mut Vec<BoundaryWarning>) -> bool {
        let Some(path) = &self.settings.settings_plist else {
            warn(warnings, BoundaryWarning::SettingsPlistNotConfigured);
            return false;
        };

        ui::display_status(&format!(
            "Setting version to {} in {}",
            version,
            path.display()
        ));
        let plist = self.repo.workdir().join(path);
        match self
            .plist
            .set_version(&plist, &self.settings.plist_key, version)
        {
            Ok(()) => {
                ui::display_success("Updated settings plist");
                true
            }
            Err(e) => {
                warn(
                    warnings,
                    BoundaryWarning::SettingsPlistUpdateFailed {
                        path: path.clone(),
                        reason: e.to_string(),
                    },
                );
                false
            }
        }
    }

    fn collect_commits(
        &self,
        previous_tag: Option<&str>,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Vec<LogEntry>> {
        let Some(tag) = previous_tag else {
            warn(warnings, BoundaryWarning::PreviousTagUnresolved);
            return self.full_history();
        };

        match self.repo.log_since(Some(tag), HEAD) {
            Ok(commits) => {
                if commits.is_empty() {
                    warn(
                        warnings,
                        BoundaryWarning::NoNewCommits {
                            previous_tag: tag.to_string(),
                        },
                    );
                }
                Ok(commits)
            }
            Err(BuildCutError::UnknownRevision(_)) => {
                warn(
                    warnings,
                    BoundaryWarning::PreviousTagMissing {
                        tag: tag.to_string(),
                    },
                );
                self.full_history()
            }
            Err(e) => Err(e),
        }
    }

    fn full_history(&self) -> Result<Vec<LogEntry>> {
        match self.repo.log_since(None, HEAD) {
            // No commits at all yet
            Err(BuildCutError::UnknownRevision(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    fn copy_to_clipboard(&self, notes: &str, warnings: &mut Vec<BoundaryWarning>) -> bool {
        match self.clipboard.copy(notes) {
            Ok(true) => true,
            Ok(false) => {
                warn(warnings, BoundaryWarning::ClipboardUnavailable);
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "clipboard copy failed");
                warn(warnings, BoundaryWarning::ClipboardUnavailable);
                false
            }
        }
    }
}

fn warn(warnings: &mut Vec<BoundaryWarning>, warning: BoundaryWarning) {
    ui::display_boundary_warning(&warning);
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(BuildStage::Start < BuildStage::Validated);
        assert!(BuildStage::NotesStaged < BuildStage::Committed);
        assert!(BuildStage::Tagged < BuildStage::Done);
    }

    #[test]
    fn test_build_number_advanced() {
        assert!(!BuildStage::Start.build_number_advanced());
        assert!(!BuildStage::Validated.build_number_advanced());
        assert!(BuildStage::VersionBumped.build_number_advanced());
        assert!(BuildStage::Committed.build_number_advanced());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(BuildStage::VersionBumped.to_string(), "version bumped");
        assert_eq!(BuildStage::NotesStaged.to_string(), "notes staged");
    }
}
