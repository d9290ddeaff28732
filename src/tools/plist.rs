use std::cell::RefCell;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{BuildCutError, Result};
use crate::tools::ToolCommand;

/// Writes the canonical version into a settings plist
pub trait PlistEditor {
    /// Set `key` in `plist` to `version`
    fn set_version(&self, plist: &Path, key: &str, version: &str) -> Result<()>;
}

/// PlistBuddy-backed editor
pub struct PlistBuddy {
    tool: ToolCommand,
}

impl PlistBuddy {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        PlistBuddy {
            tool: ToolCommand::new(program),
        }
    }
}

impl PlistEditor for PlistBuddy {
    fn set_version(&self, plist: &Path, key: &str, version: &str) -> Result<()> {
        if !plist.exists() {
            return Err(BuildCutError::PathNotFound(plist.to_path_buf()));
        }

        let command = format!("set {} {}", key, version);
        self.tool
            .run([plist.as_os_str(), OsStr::new("-c"), OsStr::new(&command)])?;
        Ok(())
    }
}

/// Records plist edits instead of performing them
#[derive(Default)]
pub struct MockPlistEditor {
    edits: RefCell<Vec<(PathBuf, String, String)>>,
    fail: bool,
}

impl MockPlistEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor whose every edit fails
    pub fn failing() -> Self {
        MockPlistEditor {
            edits: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    /// Edits made so far, as (plist, key, version)
    pub fn edits(&self) -> Vec<(PathBuf, String, String)> {
        self.edits.borrow().clone()
    }
}

impl PlistEditor for MockPlistEditor {
    fn set_version(&self, plist: &Path, key: &str, version: &str) -> Result<()> {
        if self.fail {
            return Err(BuildCutError::query_failed("PlistBuddy", "mock failure"));
        }
        self.edits
            .borrow_mut()
            .push((plist.to_path_buf(), key.to_string(), version.to_string()));
        Ok(())
    }
}
