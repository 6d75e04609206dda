// WHY: popup-style workflow (load clipboard, optimize, write back) as an owned adapter
// One session per popup lifecycle; the transformer itself stays pure and shared

use serde::Serialize;
use tracing::{info, warn};

use crate::clipboard::{ClipboardError, ClipboardProvider};
use crate::transformer::{count_occurrences, EmDashTransformer, ReplacementMode, Transformation};

/// Session configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub mode: ReplacementMode,
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// User-facing status line; clearing it later is the caller's job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Clipboard-driven optimizer owning its provider for one lifecycle
pub struct OptimizerSession<'t, P: ClipboardProvider> {
    transformer: &'t EmDashTransformer,
    clipboard: P,
    config: SessionConfig,
    loaded: String,
    last_result: Option<Transformation>,
}

impl<'t, P: ClipboardProvider> OptimizerSession<'t, P> {
    pub fn new(transformer: &'t EmDashTransformer, clipboard: P, config: SessionConfig) -> Self {
        Self {
            transformer,
            clipboard,
            config,
            loaded: String::new(),
            last_result: None,
        }
    }

    /// Read the clipboard and report how many dashes it holds
    pub fn load(&mut self) -> StatusMessage {
        match self.clipboard.read() {
            Ok(text) if text.is_empty() => {
                self.loaded.clear();
                StatusMessage::new(StatusKind::Info, "Clipboard is empty")
            }
            Ok(text) => {
                let count = count_occurrences(&text);
                self.loaded = text;
                info!(dashes = count, bytes = self.loaded.len(), "Loaded clipboard text");
                if count > 0 {
                    let plural = if count > 1 { "es" } else { "" };
                    StatusMessage::new(StatusKind::Info, format!("Found {count} em dash{plural}"))
                } else {
                    StatusMessage::new(StatusKind::Info, "No em dashes found")
                }
            }
            Err(ClipboardError::Empty) => {
                self.loaded.clear();
                StatusMessage::new(StatusKind::Info, "Clipboard is empty")
            }
            Err(e) => {
                warn!("Clipboard read failed: {}", e);
                StatusMessage::new(StatusKind::Error, "Clipboard read blocked. Click and try again.")
            }
        }
    }

    /// Transform the loaded text and write it back to the clipboard
    /// Reloads first when nothing has been loaded yet.
    pub fn optimize(&mut self) -> StatusMessage {
        if self.loaded.is_empty() {
            let status = self.load();
            if self.loaded.is_empty() {
                return match status.kind {
                    StatusKind::Error => status,
                    _ => StatusMessage::new(StatusKind::Error, "No text in clipboard"),
                };
            }
        }

        let result = self.transformer.optimize(&self.loaded, self.config.mode);

        if let Err(e) = self.clipboard.write(&result.text) {
            warn!("Clipboard write failed: {}", e);
            self.last_result = Some(result);
            return StatusMessage::new(StatusKind::Error, "Could not write to clipboard");
        }

        self.loaded = result.text.clone();
        self.last_result = Some(result);
        StatusMessage::new(StatusKind::Success, "Optimized. Ready to paste.")
    }

    /// Switch replacement mode for subsequent optimizations
    pub fn set_mode(&mut self, mode: ReplacementMode) {
        self.config.mode = mode;
    }

    pub fn mode(&self) -> ReplacementMode {
        self.config.mode
    }

    /// Text currently shown in the preview pane
    pub fn preview(&self) -> &str {
        &self.loaded
    }

    /// Outcome of the most recent optimize call
    pub fn last_result(&self) -> Option<&Transformation> {
        self.last_result.as_ref()
    }

    /// Tear down the session and hand back the provider
    pub fn close(self) -> P {
        self.clipboard
    }
}
