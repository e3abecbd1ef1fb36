//! Production [`InputBackend`] over `enigo` (key events) and `arboard`
//! (clipboard).
//!
//! A new `Enigo` / `arboard::Clipboard` handle is created for every call
//! because neither type is `Send` on all platforms and both handles are
//! cheap to construct.

use arboard::Clipboard;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use super::backend::{InputBackend, Stroke};
use super::InjectError;

/// Word-boundary modifier: Option on macOS, Ctrl elsewhere.
#[cfg(target_os = "macos")]
const WORD_MOD: Key = Key::Alt;
#[cfg(not(target_os = "macos"))]
const WORD_MOD: Key = Key::Control;

/// Command modifier for clipboard shortcuts: ⌘ on macOS, Ctrl elsewhere.
#[cfg(target_os = "macos")]
const CMD_MOD: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const CMD_MOD: Key = Key::Control;

/// System backend: real keyboard and clipboard.
///
/// `foreground_executable` returns `None` here — the windowing subsystem is
/// a host collaborator, wired in by wrapping this backend in a type that
/// overrides the query.
#[derive(Debug, Clone, Default)]
pub struct SystemBackend;

impl SystemBackend {
    pub fn new() -> Self {
        Self
    }

    fn enigo() -> Result<Enigo, InjectError> {
        Enigo::new(&Settings::default()).map_err(|e| InjectError::KeySimulation(e.to_string()))
    }

    fn clipboard() -> Result<Clipboard, InjectError> {
        Clipboard::new().map_err(|e| InjectError::ClipboardAccess(e.to_string()))
    }

    /// Press `mods`, click `key`, release `mods` in reverse order.
    fn chord(enigo: &mut Enigo, mods: &[Key], key: Key) -> Result<(), InjectError> {
        let sim = |e: enigo::InputError| InjectError::KeySimulation(e.to_string());
        for m in mods {
            enigo.key(*m, Direction::Press).map_err(sim)?;
        }
        let result = enigo.key(key, Direction::Click).map_err(sim);
        for m in mods.iter().rev() {
            // Always release held modifiers, even when the click failed.
            let _ = enigo.key(*m, Direction::Release);
        }
        result
    }
}

impl InputBackend for SystemBackend {
    fn tap(&self, stroke: Stroke) -> Result<(), InjectError> {
        let mut enigo = Self::enigo()?;
        let (mods, key): (&[Key], Key) = match stroke {
            Stroke::Enter => (&[], Key::Return),
            Stroke::Tab => (&[], Key::Tab),
            Stroke::Paste => (&[CMD_MOD], Key::Unicode('v')),
            Stroke::Copy => (&[CMD_MOD], Key::Unicode('c')),
            Stroke::SelectAll => (&[CMD_MOD], Key::Unicode('a')),
            Stroke::CharLeft => (&[], Key::LeftArrow),
            Stroke::CharRight => (&[], Key::RightArrow),
            Stroke::WordLeft => (&[WORD_MOD], Key::LeftArrow),
            Stroke::WordRight => (&[WORD_MOD], Key::RightArrow),
            Stroke::ExtendWordLeft => (&[WORD_MOD, Key::Shift], Key::LeftArrow),
            Stroke::ExtendWordRight => (&[WORD_MOD, Key::Shift], Key::RightArrow),
            Stroke::DeleteWordBack => (&[WORD_MOD], Key::Backspace),
        };
        Self::chord(&mut enigo, mods, key)
    }

    fn type_char(&self, ch: char) -> Result<(), InjectError> {
        let mut enigo = Self::enigo()?;
        let mut buf = [0u8; 4];
        enigo
            .text(ch.encode_utf8(&mut buf))
            .map_err(|e| InjectError::KeySimulation(e.to_string()))
    }

    fn read_clipboard(&self) -> Result<Option<String>, InjectError> {
        let mut clipboard = Self::clipboard()?;
        // `get_text` errors when empty or non-text — treat both as None.
        Ok(clipboard.get_text().ok())
    }

    fn write_clipboard(&self, text: &str) -> Result<(), InjectError> {
        let mut clipboard = Self::clipboard()?;
        clipboard
            .set_text(text)
            .map_err(|e| InjectError::ClipboardSet(e.to_string()))
    }
}
