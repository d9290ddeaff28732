//! External tool invocation
//!
//! Every external binary (agvtool, PlistBuddy, clipboard helpers) is run
//! through [ToolCommand], which maps spawn failures and nonzero exits onto
//! [BuildCutError] variants and logs the invocation.

pub mod clipboard;
pub mod plist;

pub use clipboard::{Clipboard, MockClipboard, NoClipboard, SystemClipboard};
pub use plist::{MockPlistEditor, PlistBuddy, PlistEditor};

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{BuildCutError, Result};

/// A configured external binary
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ToolCommand {
            program: program.into(),
        }
    }

    /// Run the tool and return its trimmed standard output.
    ///
    /// # Returns
    /// * `Ok(String)` - Trimmed stdout if the tool exits with code 0
    /// * `Err(ToolUnavailable)` - If the binary is missing or not executable
    /// * `Err(QueryFailed)` - If the tool exits nonzero; carries its exit code
    ///   and diagnostic output
    pub fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        tracing::debug!(command = ?cmd, "running external tool");

        let output = cmd.output().map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = [stdout.trim(), stderr.trim()]
                .iter()
                .filter(|s| !s.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join("\n");
            tracing::debug!(code = ?output.status.code(), "external tool failed");
            return Err(BuildCutError::QueryFailed {
                tool: self.name(),
                code: output.status.code(),
                output: diagnostic,
            });
        }

        Ok(stdout.trim().to_string())
    }

    /// Run a query and reject an empty answer
    pub fn query<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let answer = self.run(args)?;
        if answer.is_empty() {
            return Err(BuildCutError::query_failed(self.name(), "empty output"));
        }
        Ok(answer)
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }

    fn spawn_error(&self, e: std::io::Error) -> BuildCutError {
        match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => BuildCutError::ToolUnavailable {
                tool: self.name(),
                source: e,
            },
            _ => BuildCutError::Io(e),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let tool = ToolCommand::new("/nonexistent/path/to/agvtool");
        let err = tool.run(["what-version"]).unwrap_err();
        assert!(matches!(err, BuildCutError::ToolUnavailable { .. }));
    }

    #[test]
    fn test_output_is_trimmed() {
        let tool = ToolCommand::new("/bin/echo");
        assert_eq!(tool.run(["  2.3  "]).unwrap(), "2.3");
    }

    #[test]
    fn test_nonzero_exit_carries_code_and_output() {
        let tool = ToolCommand::new("/bin/sh");
        let err = tool
            .run(["-c", "echo 'no version set' >&2; exit 3"])
            .unwrap_err();
        match err {
            BuildCutError::QueryFailed { code, output, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(output, "no version set");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_query_rejects_empty_output() {
        let tool = ToolCommand::new("/bin/sh");
        let err = tool.query(["-c", "true"]).unwrap_err();
        assert!(matches!(err, BuildCutError::QueryFailed { code: None, .. }));
    }
}
