//! In-memory [`InputBackend`] used by unit tests.
//!
//! [`MockBackend`] simulates the focused application's edit control: a
//! character buffer with a caret and an optional selection, plus a fake
//! clipboard.  Word-boundary keys follow Windows edit-control semantics
//! (Ctrl+Left → start of the previous-or-current word, Ctrl+Right → start
//! of the next word, a plain arrow collapses the selection to its edge) —
//! the same semantics the caret-search algorithm was written against.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::backend::{InputBackend, Stroke};
use super::InjectError;

#[derive(Debug, Default)]
struct Edit {
    text: Vec<char>,
    caret: usize,
    /// Selection anchor; the selection spans `anchor..caret` in either
    /// direction when set.
    anchor: Option<usize>,
}

impl Edit {
    fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// Delete the active selection, leaving the caret at its start.
    fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some((start, end)) => {
                self.text.drain(start..end);
                self.caret = start;
                self.anchor = None;
                true
            }
            None => {
                self.anchor = None;
                false
            }
        }
    }

    fn insert(&mut self, s: &str) {
        self.delete_selection();
        for ch in s.chars() {
            self.text.insert(self.caret, ch);
            self.caret += 1;
        }
    }

    /// Start of the previous word (or of the current word when mid-word).
    fn word_left(&self, from: usize) -> usize {
        let mut i = from;
        while i > 0 && self.text[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !self.text[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    /// Start of the next word (or end of text).
    fn word_right(&self, from: usize) -> usize {
        let len = self.text.len();
        let mut i = from;
        while i < len && !self.text[i].is_whitespace() {
            i += 1;
        }
        while i < len && self.text[i].is_whitespace() {
            i += 1;
        }
        i
    }
}

/// Fake edit control + clipboard implementing [`InputBackend`].
pub struct MockBackend {
    edit: Mutex<Edit>,
    clipboard: Mutex<Option<String>>,
    foreground: Mutex<Option<String>>,
    fail_keys: AtomicBool,
    fail_clipboard_reads: AtomicBool,
}

impl MockBackend {
    /// Create a backend whose buffer holds `initial` with the caret at the
    /// end.  The foreground application defaults to an allow-listed
    /// browser.
    pub fn new(initial: &str) -> Self {
        let text: Vec<char> = initial.chars().collect();
        let caret = text.len();
        Self {
            edit: Mutex::new(Edit {
                text,
                caret,
                anchor: None,
            }),
            clipboard: Mutex::new(None),
            foreground: Mutex::new(Some("chrome".into())),
            fail_keys: AtomicBool::new(false),
            fail_clipboard_reads: AtomicBool::new(false),
        }
    }

    // ── Test controls ────────────────────────────────────────────────────

    pub fn set_foreground(&self, exe: Option<&str>) {
        *self.foreground.lock().unwrap() = exe.map(str::to_string);
    }

    pub fn set_caret(&self, caret: usize) {
        let mut edit = self.edit.lock().unwrap();
        edit.caret = caret.min(edit.text.len());
        edit.anchor = None;
    }

    /// Make every subsequent key event fail.
    pub fn fail_keys(&self, fail: bool) {
        self.fail_keys.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent clipboard read fail (probe-timeout shape).
    pub fn fail_clipboard_reads(&self, fail: bool) {
        self.fail_clipboard_reads.store(fail, Ordering::SeqCst);
    }

    // ── Test observations ────────────────────────────────────────────────

    pub fn text(&self) -> String {
        self.edit.lock().unwrap().text.iter().collect()
    }

    pub fn caret(&self) -> usize {
        self.edit.lock().unwrap().caret
    }

    pub fn selection(&self) -> Option<String> {
        let edit = self.edit.lock().unwrap();
        edit.selection_range()
            .map(|(start, end)| edit.text[start..end].iter().collect())
    }

    fn check_keys(&self) -> Result<(), InjectError> {
        if self.fail_keys.load(Ordering::SeqCst) {
            return Err(InjectError::KeySimulation("mock key failure".into()));
        }
        Ok(())
    }
}

impl InputBackend for MockBackend {
    fn tap(&self, stroke: Stroke) -> Result<(), InjectError> {
        self.check_keys()?;
        let mut edit = self.edit.lock().unwrap();
        match stroke {
            Stroke::Enter => edit.insert("\n"),
            Stroke::Tab => edit.insert("\t"),
            Stroke::Paste => {
                let pasted = self.clipboard.lock().unwrap().clone();
                if let Some(text) = pasted {
                    edit.insert(&text);
                }
            }
            Stroke::Copy => {
                if let Some((start, end)) = edit.selection_range() {
                    let selected: String = edit.text[start..end].iter().collect();
                    *self.clipboard.lock().unwrap() = Some(selected);
                }
                // No selection: real edit controls leave the clipboard alone.
            }
            Stroke::SelectAll => {
                edit.anchor = Some(0);
                edit.caret = edit.text.len();
            }
            Stroke::CharLeft => {
                if let Some((start, _)) = edit.selection_range() {
                    edit.caret = start;
                    edit.anchor = None;
                } else {
                    edit.anchor = None;
                    edit.caret = edit.caret.saturating_sub(1);
                }
            }
            Stroke::CharRight => {
                if let Some((_, end)) = edit.selection_range() {
                    edit.caret = end;
                    edit.anchor = None;
                } else {
                    edit.anchor = None;
                    edit.caret = (edit.caret + 1).min(edit.text.len());
                }
            }
            Stroke::WordLeft => {
                edit.anchor = None;
                edit.caret = edit.word_left(edit.caret);
            }
            Stroke::WordRight => {
                edit.anchor = None;
                edit.caret = edit.word_right(edit.caret);
            }
            Stroke::ExtendWordLeft => {
                if edit.anchor.is_none() {
                    edit.anchor = Some(edit.caret);
                }
                edit.caret = edit.word_left(edit.caret);
            }
            Stroke::ExtendWordRight => {
                if edit.anchor.is_none() {
                    edit.anchor = Some(edit.caret);
                }
                edit.caret = edit.word_right(edit.caret);
            }
            Stroke::DeleteWordBack => {
                if !edit.delete_selection() {
                    let start = edit.word_left(edit.caret);
                    let caret = edit.caret;
                    edit.text.drain(start..caret);
                    edit.caret = start;
                }
            }
        }
        Ok(())
    }

    fn type_char(&self, ch: char) -> Result<(), InjectError> {
        self.check_keys()?;
        let mut buf = [0u8; 4];
        self.edit.lock().unwrap().insert(ch.encode_utf8(&mut buf));
        Ok(())
    }

    fn read_clipboard(&self) -> Result<Option<String>, InjectError> {
        if self.fail_clipboard_reads.load(Ordering::SeqCst) {
            return Err(InjectError::ClipboardAccess("mock clipboard failure".into()));
        }
        Ok(self.clipboard.lock().unwrap().clone())
    }

    fn write_clipboard(&self, text: &str) -> Result<(), InjectError> {
        *self.clipboard.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    fn foreground_executable(&self) -> Option<String> {
        self.foreground.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends_at_caret() {
        let backend = MockBackend::new("ab");
        backend.type_char('c').unwrap();
        assert_eq!(backend.text(), "abc");
        assert_eq!(backend.caret(), 3);
    }

    #[test]
    fn word_moves() {
        let backend = MockBackend::new("le chat noir");
        backend.tap(Stroke::WordLeft).unwrap(); // start of "noir"
        assert_eq!(backend.caret(), 8);
        backend.tap(Stroke::WordLeft).unwrap(); // start of "chat"
        assert_eq!(backend.caret(), 3);
        backend.tap(Stroke::WordRight).unwrap(); // start of "noir"
        assert_eq!(backend.caret(), 8);
    }

    #[test]
    fn extend_and_copy_selection() {
        let backend = MockBackend::new("le chat noir");
        backend.set_caret(3);
        backend.tap(Stroke::ExtendWordRight).unwrap(); // "chat "
        assert_eq!(backend.selection().as_deref(), Some("chat "));
        backend.tap(Stroke::Copy).unwrap();
        assert_eq!(backend.read_clipboard().unwrap().as_deref(), Some("chat "));
    }

    #[test]
    fn arrow_collapses_selection() {
        let backend = MockBackend::new("le chat noir");
        backend.set_caret(3);
        backend.tap(Stroke::ExtendWordRight).unwrap();
        backend.tap(Stroke::CharLeft).unwrap();
        assert_eq!(backend.selection(), None);
        assert_eq!(backend.caret(), 3);
    }

    #[test]
    fn paste_inserts_clipboard() {
        let backend = MockBackend::new("ab");
        backend.write_clipboard("XY").unwrap();
        backend.tap(Stroke::Paste).unwrap();
        assert_eq!(backend.text(), "abXY");
    }

    #[test]
    fn delete_word_back() {
        let backend = MockBackend::new("bonjour le monde");
        backend.tap(Stroke::DeleteWordBack).unwrap();
        assert_eq!(backend.text(), "bonjour le ");
    }
}
