use std::cell::RefCell;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::Result;

/// Best-effort text sink for release notes
pub trait Clipboard {
    /// Copy `text`, returning whether any clipboard accepted it
    fn copy(&self, text: &str) -> Result<bool>;
}

/// Clipboard helpers tried in order; the first that accepts the text wins.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copies through whichever platform clipboard helper is installed
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<bool> {
        for (program, args) in CANDIDATES {
            let mut command = Command::new(program);
            command
                .args(*args)
                .env("LANG", "en_US.UTF-8")
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null());

            let mut child = match command.spawn() {
                Ok(child) => child,
                Err(_) => continue,
            };
            tracing::debug!(program, "copying release notes to clipboard");

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).ok();
            }
            let status = child.wait()?;
            if status.success() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Used when clipboard copying is turned off
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&self, _text: &str) -> Result<bool> {
        Ok(false)
    }
}

/// In-memory clipboard for tests
#[derive(Default)]
pub struct MockClipboard {
    contents: RefCell<Option<String>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MockClipboard {
    fn copy(&self, text: &str) -> Result<bool> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(true)
    }
}
