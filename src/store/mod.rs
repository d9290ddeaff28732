//! Version number storage
//!
//! The marketing version and build number live in external tooling state.
//! [VersionStore] exposes only the reads and writes the build workflow needs;
//! the increment rule behind [VersionStore::bump_build_number] belongs to the
//! backing tool.
//!
//! - [agvtool::AgvTool]: the real store, driven through Apple's `agvtool`
//! - [mock::MockVersionStore]: in-memory store for tests

pub mod agvtool;
pub mod mock;

pub use agvtool::AgvTool;
pub use mock::MockVersionStore;

use crate::domain::{self, Version};
use crate::error::Result;

/// Access to the project's marketing version and build number.
///
/// Reads are idempotent. Writes are not: every call to
/// [bump_build_number](VersionStore::bump_build_number) advances the build
/// number once.
///
/// Write operations return the tool's own output so callers can echo it in
/// verbose mode.
pub trait VersionStore {
    /// Current marketing version.
    ///
    /// # Returns
    /// * `Err(ToolUnavailable)` - If the backing tool cannot be run
    /// * `Err(QueryFailed)` - If the tool reports an error (e.g. no version set)
    fn marketing_version(&self) -> Result<String>;

    /// Persist a new marketing version. The value is not validated.
    fn set_marketing_version(&self, version: &str) -> Result<String>;

    /// Current build number
    fn build_number(&self) -> Result<String>;

    /// Persist a new build number. The value is not validated.
    fn set_build_number(&self, build_number: &str) -> Result<String>;

    /// Advance the build number by the backing tool's own rule.
    ///
    /// Fails with `QueryFailed` when no build number exists yet.
    fn bump_build_number(&self) -> Result<String>;

    /// Read both halves of the current version
    fn version(&self) -> Result<Version> {
        Ok(Version::new(self.marketing_version()?, self.build_number()?))
    }

    /// Canonical version string reflecting the store's state right now
    fn canonical_version(&self) -> Result<String> {
        Ok(domain::format(
            &self.marketing_version()?,
            &self.build_number()?,
        ))
    }
}
