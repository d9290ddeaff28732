use std::path::PathBuf;

use crate::error::Result;
use crate::store::VersionStore;
use crate::tools::ToolCommand;

/// [VersionStore] backed by `agvtool`, run in the current directory
pub struct AgvTool {
    tool: ToolCommand,
}

impl AgvTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        AgvTool {
            tool: ToolCommand::new(program),
        }
    }
}

impl VersionStore for AgvTool {
    fn marketing_version(&self) -> Result<String> {
        self.tool.query(["what-marketing-version", "-terse1"])
    }

    fn set_marketing_version(&self, version: &str) -> Result<String> {
        self.tool.run(["new-marketing-version", version])
    }

    fn build_number(&self) -> Result<String> {
        self.tool.query(["what-version", "-terse"])
    }

    fn set_build_number(&self, build_number: &str) -> Result<String> {
        self.tool.run(["new-version", "-all", build_number])
    }

    fn bump_build_number(&self) -> Result<String> {
        self.tool.run(["bump", "-all"])
    }
}
