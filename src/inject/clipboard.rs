//! Scoped clipboard save-and-restore.
//!
//! The system clipboard is a process-wide exclusive resource; every
//! routine that borrows it (the paste injector, the selection probe) must
//! put the prior contents back, including on error paths.
//! [`ClipboardGuard`] captures the contents on construction and restores
//! them either through the explicit [`restore`](ClipboardGuard::restore)
//! call — whose error the caller must surface, since a corrupted clipboard
//! is visible across applications — or best-effort on drop when an early
//! `?` return skipped the explicit path.

use super::backend::InputBackend;
use super::InjectError;

/// RAII guard over the saved clipboard contents.
pub struct ClipboardGuard<'a> {
    backend: &'a dyn InputBackend,
    saved: Option<String>,
    restored: bool,
}

impl<'a> ClipboardGuard<'a> {
    /// Capture the current clipboard contents.
    ///
    /// `Ok(guard)` even when the clipboard was empty or non-text — that
    /// state is restored as empty text, so a copy made while the guard was
    /// live leaves no residue.
    pub fn save(backend: &'a dyn InputBackend) -> Result<Self, InjectError> {
        let saved = backend.read_clipboard()?;
        Ok(Self {
            backend,
            saved,
            restored: false,
        })
    }

    /// Put the saved contents back, consuming the guard.
    ///
    /// A failure here is escalated to the caller rather than swallowed.
    pub fn restore(mut self) -> Result<(), InjectError> {
        self.restored = true;
        self.restore_inner()
    }

    fn restore_inner(&mut self) -> Result<(), InjectError> {
        // An empty / non-text clipboard restores as empty text.
        let text = self.saved.take().unwrap_or_default();
        self.backend
            .write_clipboard(&text)
            .map_err(|e| InjectError::ClipboardRestore(e.to_string()))
    }
}

impl Drop for ClipboardGuard<'_> {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = self.restore_inner() {
                log::error!("clipboard restore failed on drop: {e}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
