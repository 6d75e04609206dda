//! Clipboard access for the optimizer session.
//!
//! The core never touches the clipboard. A session owns one provider:
//! 1. `SystemClipboard` - the OS clipboard via the `arboard` crate
//! 2. `MemoryClipboard` - an in-process buffer for tests and headless runs

/// Read/write contract a session needs from a clipboard.
pub trait ClipboardProvider {
    /// Returns the current clipboard text.
    fn read(&mut self) -> Result<String, ClipboardError>;

    /// Replaces the clipboard text.
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard backed by arboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Opens the system clipboard.
    ///
    /// Fails with [`ClipboardError::Unavailable`] when no clipboard exists,
    /// e.g. on a headless machine without a display server.
    pub fn open() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        self.inner.get_text().map_err(ClipboardError::from)
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text).map_err(ClipboardError::from)
    }
}

/// In-memory clipboard.
///
/// Failures can be injected to exercise the error paths a real clipboard
/// produces when access is denied.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
    deny_read: bool,
    deny_write: bool,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn deny_reads(mut self) -> Self {
        self.deny_read = true;
        self
    }

    pub fn deny_writes(mut self) -> Self {
        self.deny_write = true;
        self
    }

    /// Current contents, if any.
    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        if self.deny_read {
            return Err(ClipboardError::Denied("read blocked".to_string()));
        }
        self.text.clone().ok_or(ClipboardError::Empty)
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.deny_write {
            return Err(ClipboardError::Denied("write blocked".to_string()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be reached.
    Unavailable(String),
    /// The clipboard refused the operation.
    Denied(String),
    /// The clipboard holds no text.
    Empty,
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ContentNotAvailable => ClipboardError::Empty,
            arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(err.to_string()),
            other => ClipboardError::Denied(other.to_string()),
        }
    }
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "Clipboard unavailable: {}", msg),
            ClipboardError::Denied(msg) => write!(f, "Clipboard access denied: {}", msg),
            ClipboardError::Empty => write!(f, "Clipboard is empty"),
        }
    }
}

impl std::error::Error for ClipboardError {}
