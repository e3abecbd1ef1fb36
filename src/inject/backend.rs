//! The [`InputBackend`] trait — the engine's only seam to the operating
//! system.
//!
//! Everything the engine does to the focused application goes through this
//! trait: synthetic key chords, per-character typing, clipboard reads and
//! writes, and the foreground-executable query consumed from the host's
//! windowing layer.  Implementations must be `Send + Sync` so a backend can
//! be held behind an `Arc<dyn InputBackend>` and shared between the
//! orchestrator and the word locator.

use super::InjectError;

// ---------------------------------------------------------------------------
// Stroke
// ---------------------------------------------------------------------------

/// The closed set of key chords the engine emits.
///
/// Word moves use the platform word-boundary modifier (Ctrl on
/// Windows/Linux, Option on macOS); `Paste`/`Copy`/`SelectAll` use the
/// platform command modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Paste shortcut (Ctrl+V / ⌘V).
    Paste,
    /// Copy shortcut (Ctrl+C / ⌘C).
    Copy,
    /// Select-all shortcut (Ctrl+A / ⌘A).
    SelectAll,
    /// Caret one character left; collapses an active selection.
    CharLeft,
    /// Caret one character right; collapses an active selection.
    CharRight,
    /// Caret one word-boundary left (Ctrl+Left).
    WordLeft,
    /// Caret one word-boundary right (Ctrl+Right).
    WordRight,
    /// Extend the selection one word-boundary left (Ctrl+Shift+Left).
    ExtendWordLeft,
    /// Extend the selection one word-boundary right (Ctrl+Shift+Right).
    ExtendWordRight,
    /// Delete back to the previous word boundary (Ctrl+Backspace); deletes
    /// the selection when one is active.
    DeleteWordBack,
}

// ---------------------------------------------------------------------------
// InputBackend
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to keyboard, clipboard and focus.
///
/// # Contract
///
/// - `tap` and `type_char` deliver exactly one input event to the focused
///   application, or fail with [`InjectError::KeySimulation`].
/// - `read_clipboard` returns `Ok(None)` when the clipboard is empty or
///   holds non-text data; it only errors when the clipboard itself cannot
///   be opened.
/// - `foreground_executable` returns the lower-cased executable name of the
///   foreground window, or `None` when the host provides no windowing
///   query (the exclusive-to-target gate then rejects).
pub trait InputBackend: Send + Sync {
    /// Send one key chord to the focused application.
    fn tap(&self, stroke: Stroke) -> Result<(), InjectError>;

    /// Type one literal character into the focused application.
    fn type_char(&self, ch: char) -> Result<(), InjectError>;

    /// Read the clipboard's plain-text content.
    fn read_clipboard(&self) -> Result<Option<String>, InjectError>;

    /// Replace the clipboard's content with `text`.
    fn write_clipboard(&self, text: &str) -> Result<(), InjectError>;

    /// Executable name of the current foreground window, if known.
    fn foreground_executable(&self) -> Option<String> {
        None
    }
}

// Compile-time assertion: Box<dyn InputBackend> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn InputBackend>) {}
};
