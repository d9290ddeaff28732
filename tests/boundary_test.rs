use std::path::PathBuf;

use build_cut::boundary::BoundaryWarning;
use build_cut::git::{ChangeKind, ChangedPath, WorkingTreeStatus};
use build_cut::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_previous_tag_missing_display() {
    let warning = BoundaryWarning::PreviousTagMissing {
        tag: "releases/v2.3_41".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("releases/v2.3_41"),
        "Message should contain the tag, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("full history"),
        "Message should mention the fallback, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        previous_tag: "releases/v1.0_3".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("releases/v1.0_3"),
        "Message should contain the tag, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_plist_failure_display() {
    let warning = BoundaryWarning::SettingsPlistUpdateFailed {
        path: PathBuf::from("Settings.bundle/Root.plist"),
        reason: "PlistBuddy failed (exit 1): Entry Does Not Exist".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("Settings.bundle/Root.plist"),
        "Message should contain the plist path, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("Entry Does Not Exist"),
        "Message should contain the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_skip_messages() {
    assert!(BoundaryWarning::SettingsPlistNotConfigured
        .to_string()
        .contains("skipping"));
    assert!(BoundaryWarning::ClipboardUnavailable
        .to_string()
        .contains("clipboard"));
    assert!(BoundaryWarning::PreviousTagUnresolved
        .to_string()
        .contains("full history"));
}

// ============================================================================
// Dirty Tree Formatting Tests
// ============================================================================

#[test]
fn test_dirty_tree_lists_both_categories() {
    let status = WorkingTreeStatus {
        unstaged: vec![ChangedPath::new(ChangeKind::Modified, "App/main.swift")],
        staged: vec![ChangedPath::new(ChangeKind::Added, "App/new.swift")],
    };

    let message = ui::format_dirty_tree("start", &status);
    assert!(message.contains("Cannot start: there are unstaged changes"));
    assert!(message.contains("M\tApp/main.swift"));
    assert!(message.contains("Cannot start: the index contains uncommitted changes"));
    assert!(message.contains("A\tApp/new.swift"));
    assert!(message.ends_with("Please commit or stash them"));
}

#[test]
fn test_dirty_tree_omits_clean_category() {
    let status = WorkingTreeStatus {
        unstaged: vec![ChangedPath::new(ChangeKind::Deleted, "old.txt")],
        staged: vec![],
    };

    let message = ui::format_dirty_tree("start", &status);
    assert!(message.contains("unstaged changes"));
    assert!(!message.contains("index contains"));
}
