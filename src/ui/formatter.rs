//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Status goes to stdout; errors and warnings go to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::git::WorkingTreeStatus;
use crate::workflow::BuildOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render both change categories of a dirty tree, one path per line.
///
/// `action` completes "Cannot <action>: ..." (e.g. "start").
pub fn format_dirty_tree(action: &str, status: &WorkingTreeStatus) -> String {
    let mut lines = Vec::new();

    if !status.unstaged.is_empty() {
        lines.push(format!("Cannot {}: there are unstaged changes", action));
        lines.extend(status.unstaged.iter().map(|path| path.to_string()));
    }
    if !status.staged.is_empty() {
        lines.push(format!(
            "Cannot {}: the index contains uncommitted changes",
            action
        ));
        lines.extend(status.staged.iter().map(|path| path.to_string()));
    }
    lines.push("Please commit or stash them".to_string());

    lines.join("\n")
}

/// Print the dirty-tree report to stderr.
pub fn display_dirty_tree(action: &str, status: &WorkingTreeStatus) {
    eprintln!("{}", format_dirty_tree(action, status));
}

/// Summarize a completed build cut.
pub fn display_build_summary(outcome: &BuildOutcome) {
    println!(
        "\n{} Cut build {} ({} commit{} in release notes)",
        style("✓").green(),
        style(&outcome.version).bold(),
        outcome.commit_count,
        if outcome.commit_count == 1 { "" } else { "s" }
    );
    println!("  Notes: {}", outcome.notes_path.display());
    println!("  Tag:   {}", style(&outcome.tag.name).green());
}

/// Remind the operator that a rerun bumps the build number again.
pub fn display_rerun_hazard() {
    eprintln!(
        "{} The build number has already been bumped. Running make-build again will bump it a second time.",
        style("⚠ WARNING:").yellow()
    );
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To publish this tag, run:\n  {}",
        style("→").yellow(),
        style(format!("build-cut push-tag {} --remote {}", tag, remote)).cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{ChangeKind, ChangedPath};

    #[test]
    fn test_format_dirty_tree_lists_both_categories() {
        let status = WorkingTreeStatus {
            unstaged: vec![ChangedPath::new(ChangeKind::Modified, "README.md")],
            staged: vec![ChangedPath::new(ChangeKind::Added, "new.txt")],
        };

        let report = format_dirty_tree("start", &status);
        assert_eq!(
            report,
            "Cannot start: there are unstaged changes\n\
             M\tREADME.md\n\
             Cannot start: the index contains uncommitted changes\n\
             A\tnew.txt\n\
             Please commit or stash them"
        );
    }

    #[test]
    fn test_format_dirty_tree_only_unstaged() {
        let status = WorkingTreeStatus {
            unstaged: vec![ChangedPath::new(ChangeKind::Deleted, "gone.txt")],
            staged: vec![],
        };

        let report = format_dirty_tree("start", &status);
        assert!(report.contains("unstaged changes"));
        assert!(!report.contains("index contains"));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_boundary_warning(&BoundaryWarning::ClipboardUnavailable);
    }
}
