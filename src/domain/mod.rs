//! Domain types for build cutting
//!
//! Pure values with no I/O: the version pair and its canonical string, the
//! release tag derived from it, history entries, and release notes rendering.

pub mod commit;
pub mod notes;
pub mod tag;
pub mod version;

pub use commit::LogEntry;
pub use notes::{notes_path, render};
pub use tag::{tag_name_for, TagHandle, RELEASE_TAG_PREFIX};
pub use version::{format, Version};
