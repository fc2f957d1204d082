//! # Clipboard Service
//!
//! Reads the system clipboard for the paste binding. The read is blocking
//! and happens inside the event loop.

use crate::repl::error::ReqlineError;

/// Source of pasted text
pub trait ClipboardProvider {
    fn read_text(&mut self) -> Result<String, ReqlineError>;
}

/// System clipboard backed by `arboard`, opened lazily on first paste
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ReqlineError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ReqlineError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }

        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .get_text()
                .map_err(|e| ReqlineError::Clipboard(e.to_string())),
            None => Err(ReqlineError::Clipboard("clipboard not initialized".into())),
        }
    }
}

/// Fixed clipboard content for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard {
    content: Option<String>,
}

impl StaticClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
        }
    }

    /// A clipboard whose every read fails
    pub fn unavailable() -> Self {
        Self { content: None }
    }
}

impl ClipboardProvider for StaticClipboard {
    fn read_text(&mut self) -> Result<String, ReqlineError> {
        self.content
            .clone()
            .ok_or_else(|| ReqlineError::Clipboard("no clipboard content".into()))
    }
}
