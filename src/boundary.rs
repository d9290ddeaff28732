use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while cutting a build.
/// These are reported to the user but never stop the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No settings plist is configured, so the plist step is skipped
    SettingsPlistNotConfigured,
    /// The settings plist could not be updated
    SettingsPlistUpdateFailed { path: PathBuf, reason: String },
    /// The previous release tag does not exist; notes cover the whole history
    PreviousTagMissing { tag: String },
    /// The version store could not be queried for a default previous tag
    PreviousTagUnresolved,
    /// No commits since the previous release tag
    NoNewCommits { previous_tag: String },
    /// No clipboard helper accepted the release notes
    ClipboardUnavailable,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::SettingsPlistNotConfigured => {
                write!(f, "No settings plist configured; skipping plist update")
            }
            BoundaryWarning::SettingsPlistUpdateFailed { path, reason } => {
                write!(
                    f,
                    "Could not update settings plist '{}': {}",
                    path.display(),
                    reason
                )
            }
            BoundaryWarning::PreviousTagMissing { tag } => {
                write!(
                    f,
                    "Previous tag '{}' not found; release notes cover the full history",
                    tag
                )
            }
            BoundaryWarning::PreviousTagUnresolved => {
                write!(
                    f,
                    "Could not determine the previous tag; release notes cover the full history"
                )
            }
            BoundaryWarning::NoNewCommits { previous_tag } => {
                write!(f, "No new commits since tag '{}'", previous_tag)
            }
            BoundaryWarning::ClipboardUnavailable => {
                write!(f, "No clipboard available; release notes were not copied")
            }
        }
    }
}
