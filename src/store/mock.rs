use std::cell::{Cell, RefCell};

use crate::error::{BuildCutError, Result};
use crate::store::VersionStore;

/// In-memory version store for testing without agvtool
///
/// Numeric build numbers bump by one; anything else gets ".1" appended.
#[derive(Default)]
pub struct MockVersionStore {
    marketing_version: RefCell<Option<String>>,
    build_number: RefCell<Option<String>>,
    mutations: Cell<usize>,
    fail_bump: bool,
}

impl MockVersionStore {
    /// Create a store holding the given version
    pub fn new(marketing_version: impl Into<String>, build_number: impl Into<String>) -> Self {
        MockVersionStore {
            marketing_version: RefCell::new(Some(marketing_version.into())),
            build_number: RefCell::new(Some(build_number.into())),
            ..Self::default()
        }
    }

    /// Create a store with no version set; every read fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Make every bump fail as the tool would
    pub fn with_failing_bump(mut self) -> Self {
        self.fail_bump = true;
        self
    }

    /// Number of calls to mutating operations so far
    pub fn mutation_count(&self) -> usize {
        self.mutations.get()
    }

    fn read(value: &RefCell<Option<String>>, what: &str) -> Result<String> {
        value
            .borrow()
            .clone()
            .ok_or_else(|| BuildCutError::query_failed("mock agvtool", format!("no {} set", what)))
    }

    fn record_mutation(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

impl VersionStore for MockVersionStore {
    fn marketing_version(&self) -> Result<String> {
        Self::read(&self.marketing_version, "marketing version")
    }

    fn set_marketing_version(&self, version: &str) -> Result<String> {
        self.record_mutation();
        *self.marketing_version.borrow_mut() = Some(version.to_string());
        Ok(format!("marketing version set to {}", version))
    }

    fn build_number(&self) -> Result<String> {
        Self::read(&self.build_number, "build number")
    }

    fn set_build_number(&self, build_number: &str) -> Result<String> {
        self.record_mutation();
        *self.build_number.borrow_mut() = Some(build_number.to_string());
        Ok(format!("build number set to {}", build_number))
    }

    fn bump_build_number(&self) -> Result<String> {
        self.record_mutation();
        if self.fail_bump {
            return Err(BuildCutError::QueryFailed {
                tool: "mock agvtool".to_string(),
                code: Some(1),
                output: "bump refused".to_string(),
            });
        }

        let current = Self::read(&self.build_number, "build number")?;
        let next = match current.parse::<u64>() {
            Ok(n) => (n + 1).to_string(),
            Err(_) => format!("{}.1", current),
        };
        *self.build_number.borrow_mut() = Some(next.clone());
        Ok(format!("build number bumped to {}", next))
    }
}
