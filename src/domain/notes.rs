//! Release notes rendering
//!
//! Notes are a plain bullet list, one line per commit, in the order the
//! history range was supplied (oldest first).

use std::path::{Path, PathBuf};

use crate::domain::LogEntry;

/// Render commits as a release notes document.
///
/// Each commit becomes "* `<hash>` <subject>" followed by a newline. An empty
/// range yields an empty document.
pub fn render(commits: &[LogEntry]) -> String {
    commits
        .iter()
        .map(|commit| format!("* `{}` {}\n", commit.short_hash, commit.subject))
        .collect()
}

/// Location of the notes file for a canonical version, relative to the
/// repository root: `<directory>/v<canonical>.<extension>`.
pub fn notes_path(directory: &Path, canonical: &str, extension: &str) -> PathBuf {
    directory.join(format!("v{}.{}", canonical, extension))
}
