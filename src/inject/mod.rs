//! Text injection — turning a formatted string into synthetic input events
//! in the focused application.
//!
//! # Overview
//!
//! Three strategies, selected by [`InjectionMode`]:
//!
//! 1. **CharacterStream** (default, most compatible): one key event per
//!    character, `\n` and `\t` mapped to Enter/Tab, with a small fixed
//!    delay between keystrokes so the target application keeps up.
//! 2. **ClipboardPaste**: save clipboard → write text → paste shortcut →
//!    restore clipboard, restoration guaranteed even when the paste fails.
//! 3. **Hybrid**: clipboard paste with a character-stream fallback on any
//!    error.
//!
//! All OS access goes through the [`InputBackend`] trait so the whole
//! pipeline can be exercised against an in-memory edit buffer.

pub mod backend;
pub mod clipboard;
#[cfg(test)]
pub mod mock;
pub mod system;

pub use backend::{InputBackend, Stroke};
pub use clipboard::ClipboardGuard;
pub use system::SystemBackend;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::InjectionConfig;

// ---------------------------------------------------------------------------
// InjectError
// ---------------------------------------------------------------------------

/// All errors that can surface during text injection.
#[derive(Debug, Clone, Error)]
pub enum InjectError {
    /// Could not open or read the system clipboard.
    #[error("cannot access clipboard: {0}")]
    ClipboardAccess(String),

    /// Could not write text to the system clipboard.
    #[error("cannot set clipboard text: {0}")]
    ClipboardSet(String),

    /// Could not put the saved clipboard contents back.  Escalated rather
    /// than swallowed: a clobbered clipboard is visible to every
    /// application on the system.
    #[error("cannot restore clipboard contents: {0}")]
    ClipboardRestore(String),

    /// Could not simulate a key press/release event.
    #[error("cannot simulate key press: {0}")]
    KeySimulation(String),
}

// ---------------------------------------------------------------------------
// InjectionMode
// ---------------------------------------------------------------------------

/// Injection strategy — a configuration value, not runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionMode {
    /// One key event per character.
    CharacterStream,
    /// Clipboard write + paste shortcut, prior contents restored.
    ClipboardPaste,
    /// ClipboardPaste with CharacterStream fallback.
    Hybrid,
}

impl Default for InjectionMode {
    fn default() -> Self {
        Self::CharacterStream
    }
}

// ---------------------------------------------------------------------------
// TextInjector
// ---------------------------------------------------------------------------

/// Delivers formatted text to the focused application through an
/// [`InputBackend`] using the configured [`InjectionMode`] and inter-step
/// delays.
#[derive(Clone)]
pub struct TextInjector {
    backend: Arc<dyn InputBackend>,
    mode: InjectionMode,
    /// Delay between keystrokes in CharacterStream mode.
    keystroke_delay: Duration,
    /// Delay after the clipboard write, before the paste shortcut.
    clipboard_settle: Duration,
    /// Delay after the paste shortcut, before the clipboard restore.
    paste_settle: Duration,
}

impl TextInjector {
    /// Build an injector from the injection config section.
    pub fn new(backend: Arc<dyn InputBackend>, config: &InjectionConfig) -> Self {
        Self {
            backend,
            mode: config.mode,
            keystroke_delay: Duration::from_millis(config.keystroke_delay_ms),
            clipboard_settle: Duration::from_millis(config.clipboard_settle_ms),
            paste_settle: Duration::from_millis(config.paste_settle_ms),
        }
    }

    /// Inject `text` with the configured mode.
    ///
    /// # Errors
    ///
    /// Any [`InjectError`] from the backend.  Callers treat a failure as
    /// "nothing was injected" — the tail state must not be updated.
    pub fn inject(&self, text: &str) -> Result<(), InjectError> {
        match self.mode {
            InjectionMode::CharacterStream => self.inject_keys(text),
            InjectionMode::ClipboardPaste => self.inject_paste(text),
            InjectionMode::Hybrid => self.inject_paste(text).or_else(|e| {
                log::warn!("clipboard paste failed ({e}); falling back to key events");
                self.inject_keys(text)
            }),
        }
    }

    /// One key event per character; `\n` and `\t` become Enter/Tab.
    fn inject_keys(&self, text: &str) -> Result<(), InjectError> {
        for ch in text.chars() {
            match ch {
                '\n' => self.backend.tap(Stroke::Enter)?,
                '\t' => self.backend.tap(Stroke::Tab)?,
                _ => self.backend.type_char(ch)?,
            }
            sleep(self.keystroke_delay);
        }
        Ok(())
    }

    /// Clipboard round trip: save → set → paste → restore.
    ///
    /// The restore always runs; when both the paste and the restore fail,
    /// the restore error wins — a corrupted clipboard must surface.
    fn inject_paste(&self, text: &str) -> Result<(), InjectError> {
        let guard = ClipboardGuard::save(self.backend.as_ref())?;
        self.backend.write_clipboard(text)?;
        sleep(self.clipboard_settle);
        let pasted = self.backend.tap(Stroke::Paste);
        sleep(self.paste_settle);
        guard.restore()?;
        pasted
    }
}

impl std::fmt::Debug for TextInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInjector")
            .field("mode", &self.mode)
            .field("keystroke_delay", &self.keystroke_delay)
            .finish_non_exhaustive()
    }
}

fn sleep(d: Duration) {
    if !d.is_zero() {
        std::thread::sleep(d);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
