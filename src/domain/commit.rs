/// One commit in a history range, as shown in release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Abbreviated commit hash
    pub short_hash: String,
    /// First line of the commit message
    pub subject: String,
}

impl LogEntry {
    pub fn new(short_hash: impl Into<String>, subject: impl Into<String>) -> Self {
        LogEntry {
            short_hash: short_hash.into(),
            subject: subject.into(),
        }
    }
}

impl From<(&str, &str)> for LogEntry {
    fn from((short_hash, subject): (&str, &str)) -> Self {
        LogEntry::new(short_hash, subject)
    }
}
