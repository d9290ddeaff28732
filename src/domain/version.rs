use std::fmt;

/// Marketing version and build number as reported by the version store.
///
/// Both halves are opaque tokens. Nothing here parses them or assumes a
/// semantic-versioning shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub marketing_version: String,
    pub build_number: String,
}

impl Version {
    /// Create a version from its two halves
    pub fn new(marketing_version: impl Into<String>, build_number: impl Into<String>) -> Self {
        Version {
            marketing_version: marketing_version.into(),
            build_number: build_number.into(),
        }
    }

    /// The canonical version string, e.g. "2.3_42"
    pub fn canonical(&self) -> String {
        format(&self.marketing_version, &self.build_number)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.marketing_version, self.build_number)
    }
}

/// Combine a marketing version and build number into the canonical string.
///
/// # Example
/// ```rust
/// assert_eq!(build_cut::domain::format("2.3", "42"), "2.3_42");
/// ```
pub fn format(marketing_version: &str, build_number: &str) -> String {
    format!("{}_{}", marketing_version, build_number)
}
