use std::fmt;

/// Prefix shared by every release tag this tool creates
pub const RELEASE_TAG_PREFIX: &str = "releases/v";

/// Derive the release tag name from a canonical version string.
///
/// # Example
/// ```rust
/// assert_eq!(build_cut::domain::tag_name_for("2.3_42"), "releases/v2.3_42");
/// ```
pub fn tag_name_for(canonical: &str) -> String {
    format!("{}{}", RELEASE_TAG_PREFIX, canonical)
}

/// An annotated tag created by a build cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHandle {
    /// Short tag name, without the `refs/tags/` prefix
    pub name: String,
    /// Object id of the tagged commit
    pub target: String,
}

impl TagHandle {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        TagHandle {
            name: name.into(),
            target: target.into(),
        }
    }

    /// Full reference name, e.g. "refs/tags/releases/v2.3_42"
    pub fn refname(&self) -> String {
        format!("refs/tags/{}", self.name)
    }
}

impl fmt::Display for TagHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::format;

    #[test]
    fn test_tag_name_for() {
        assert_eq!(tag_name_for("2.3_42"), "releases/v2.3_42");
    }

    #[test]
    fn test_tag_name_for_formatted_version() {
        let pairs = [("1.0", "1"), ("10.4.2", "310"), ("beta", "x7")];
        for (marketing, build) in pairs {
            assert_eq!(
                tag_name_for(&format(marketing, build)),
                format!("releases/v{}_{}", marketing, build)
            );
        }
    }

    #[test]
    fn test_tag_handle_refname() {
        let tag = TagHandle::new("releases/v1.0_3", "abc");
        assert_eq!(tag.refname(), "refs/tags/releases/v1.0_3");
        assert_eq!(tag.to_string(), "releases/v1.0_3");
    }
}
