use std::path::PathBuf;

use thiserror::Error;

use crate::git::WorkingTreeStatus;
use crate::workflow::BuildStage;

/// Unified error type for build-cut operations
#[derive(Error, Debug)]
pub enum BuildCutError {
    #[error("Tool unavailable: {tool}: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed{}: {output}", exit_suffix(.code))]
    QueryFailed {
        tool: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Working tree is not clean ({})", .0.summary())]
    DirtyWorkingTree(WorkingTreeStatus),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("Commit failed: {0}")]
    CommitFailed(String),

    #[error("Tag already exists: {0}")]
    TagAlreadyExists(String),

    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Remote rejected: {0}")]
    RemoteRejected(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("make-build halted after {stage}: {source}")]
    Halted {
        stage: BuildStage,
        #[source]
        source: Box<BuildCutError>,
    },
}

/// Convenience type alias for Results in build-cut
pub type Result<T> = std::result::Result<T, BuildCutError>;

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

impl BuildCutError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BuildCutError::Config(msg.into())
    }

    /// Create a query failure for a tool that produced no usable answer
    pub fn query_failed(tool: impl Into<String>, output: impl Into<String>) -> Self {
        BuildCutError::QueryFailed {
            tool: tool.into(),
            code: None,
            output: output.into(),
        }
    }

    /// Wrap a failure with the last workflow stage that completed
    pub fn halted(stage: BuildStage, source: BuildCutError) -> Self {
        BuildCutError::Halted {
            stage,
            source: Box::new(source),
        }
    }

    /// Process exit code for this error.
    ///
    /// External tool failures propagate the tool's own nonzero exit code;
    /// everything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildCutError::QueryFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            BuildCutError::Halted { source, .. } => source.exit_code(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildCutError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuildCutError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_query_failed_display_includes_exit_code() {
        let err = BuildCutError::QueryFailed {
            tool: "agvtool".to_string(),
            code: Some(3),
            output: "no marketing version".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "agvtool failed with exit code 3: no marketing version"
        );
    }

    #[test]
    fn test_query_failed_display_without_code() {
        let err = BuildCutError::query_failed("agvtool", "empty output");
        assert_eq!(err.to_string(), "agvtool failed: empty output");
    }

    #[test]
    fn test_exit_code_propagates_tool_code() {
        let err = BuildCutError::QueryFailed {
            tool: "agvtool".to_string(),
            code: Some(4),
            output: String::new(),
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        let errors = vec![
            BuildCutError::config("x"),
            BuildCutError::NothingToCommit,
            BuildCutError::TagAlreadyExists("releases/v1_1".to_string()),
            BuildCutError::DirtyWorkingTree(WorkingTreeStatus::default()),
            BuildCutError::query_failed("agvtool", "x"),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "unexpected exit code for {}", err);
        }
    }

    #[test]
    fn test_halted_delegates_exit_code_and_names_stage() {
        let source = BuildCutError::QueryFailed {
            tool: "PlistBuddy".to_string(),
            code: Some(2),
            output: "boom".to_string(),
        };
        let err = BuildCutError::halted(BuildStage::VersionBumped, source);

        assert_eq!(err.exit_code(), 2);
        let msg = err.to_string();
        assert!(msg.starts_with("make-build halted after version bumped"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_tool_unavailable_keeps_source() {
        use std::error::Error as _;

        let err = BuildCutError::ToolUnavailable {
            tool: "/usr/bin/agvtool".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/usr/bin/agvtool"));
        assert!(err.source().is_some());
    }
}
