//! Word Locator — selection-by-content caret search.
//!
//! The engine has no access to the focused application's text buffer, so
//! finding a word near the caret means probing the only oracle available:
//! move the caret word by word, select the adjacent word, copy the
//! selection and compare it (normalized) against the spoken target.
//!
//! The search is bounded by a maximum attempt count and guarantees the
//! caret returns to its starting position when the word is not found — no
//! silent cursor drift.  On success the matching word is left selected so
//! the caller can act on it (delete, replace…).
//!
//! Normalization makes the comparison robust against on-screen
//! capitalization and attached punctuation that speech-to-text spelling
//! of the target will not reproduce.

use std::sync::Arc;
use std::time::Duration;

use crate::config::LocatorConfig;
use crate::inject::{ClipboardGuard, InjectError, InputBackend, Stroke};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which side of the caret to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

// ---------------------------------------------------------------------------
// normalize_word
// ---------------------------------------------------------------------------

/// Normalize a word for content comparison: lower-case, keep only
/// letters/digits/apostrophe/hyphen, trim leading and trailing apostrophes
/// and hyphens.
pub fn normalize_word(s: &str) -> String {
    let kept: String = s
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect();
    kept.trim_matches(|c| c == '\'' || c == '-').to_string()
}

/// First whitespace-separated token of a (possibly multi-word) dictation
/// slot — the search targets a single word.
fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

// ---------------------------------------------------------------------------
// WordLocator
// ---------------------------------------------------------------------------

/// Bounded caret search with guaranteed rollback.
#[derive(Clone)]
pub struct WordLocator {
    backend: Arc<dyn InputBackend>,
    max_attempts: usize,
    step_delay: Duration,
    probe_settle: Duration,
}

impl WordLocator {
    pub fn new(backend: Arc<dyn InputBackend>, config: &LocatorConfig) -> Self {
        Self {
            backend,
            max_attempts: config.max_attempts,
            step_delay: Duration::from_millis(config.step_delay_ms),
            probe_settle: Duration::from_millis(config.probe_settle_ms),
        }
    }

    /// Search for `target` adjacent to the caret in `direction`, using the
    /// configured attempt bound.
    pub fn select_word(&self, direction: Direction, target: &str) -> Result<bool, InjectError> {
        self.select_word_bounded(direction, target, self.max_attempts)
    }

    /// Search with an explicit attempt bound.
    ///
    /// Returns `Ok(true)` with the matching word left selected, or
    /// `Ok(false)` with the caret rolled back to its starting position.
    /// A hard backend error also rolls back (best effort) before
    /// propagating.
    pub fn select_word_bounded(
        &self,
        direction: Direction,
        target: &str,
        max_attempts: usize,
    ) -> Result<bool, InjectError> {
        let target = normalize_word(first_token(target));
        if target.is_empty() {
            log::debug!("word search: empty target after normalization, no-op");
            return Ok(false);
        }

        let mut moves = 0usize;
        match self.search(direction, &target, max_attempts, &mut moves) {
            Ok(true) => {
                log::debug!("word search: found {target:?} after {moves} moves");
                Ok(true)
            }
            Ok(false) => {
                log::debug!("word search: {target:?} not found within {max_attempts} attempts");
                self.rollback(direction, moves)?;
                Ok(false)
            }
            Err(e) => {
                if let Err(rb) = self.rollback(direction, moves) {
                    log::warn!("word search: rollback after error also failed: {rb}");
                }
                Err(e)
            }
        }
    }

    /// One probe loop.  `moves` counts completed (failed) attempts so the
    /// caller can roll back exactly that many word-boundary moves.
    fn search(
        &self,
        direction: Direction,
        target: &str,
        max_attempts: usize,
        moves: &mut usize,
    ) -> Result<bool, InjectError> {
        for _ in 0..max_attempts {
            match direction {
                Direction::Left => {
                    // To the start of the previous word, then select it.
                    self.backend.tap(Stroke::WordLeft)?;
                    self.pause();
                    self.backend.tap(Stroke::ExtendWordRight)?;
                    self.pause();
                }
                Direction::Right => {
                    // Selecting rightward is the move: extend from the
                    // caret over the next word.
                    self.backend.tap(Stroke::ExtendWordRight)?;
                    self.pause();
                }
            }

            if let Some(selected) = self.probe_selection()? {
                if normalize_word(&selected) == target {
                    return Ok(true);
                }
            }

            // Step one character back so overlapping word boundaries are
            // not skipped on the next attempt.
            match direction {
                Direction::Left => self.backend.tap(Stroke::CharLeft)?,
                Direction::Right => self.backend.tap(Stroke::CharRight)?,
            }
            self.pause();
            *moves += 1;
        }
        Ok(false)
    }

    /// Read the current selection via a copy-to-clipboard probe.
    ///
    /// The clipboard is saved and restored around the copy.  A clipboard
    /// read failure (a race with the OS) is treated as "nothing selected"
    /// for this attempt rather than aborting the search; only key-event
    /// and clipboard-restore failures are hard errors.
    fn probe_selection(&self) -> Result<Option<String>, InjectError> {
        let guard = match ClipboardGuard::save(self.backend.as_ref()) {
            Ok(guard) => guard,
            Err(e) => {
                log::warn!("selection probe: clipboard save failed ({e}); counting as miss");
                return Ok(None);
            }
        };

        self.backend.tap(Stroke::Copy)?;
        sleep(self.probe_settle);
        let read = self.backend.read_clipboard();
        guard.restore()?;

        match read {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!("selection probe: clipboard read failed ({e}); counting as miss");
                Ok(None)
            }
        }
    }

    /// Replay `moves` word-boundary moves in the opposite direction to put
    /// the caret back where the search started.
    fn rollback(&self, direction: Direction, moves: usize) -> Result<(), InjectError> {
        let stroke = match direction {
            Direction::Left => Stroke::WordRight,
            Direction::Right => Stroke::WordLeft,
        };
        for _ in 0..moves {
            self.backend.tap(stroke)?;
            self.pause();
        }
        Ok(())
    }

    fn pause(&self) {
        sleep(self.step_delay);
    }
}

impl std::fmt::Debug for WordLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordLocator")
            .field("max_attempts", &self.max_attempts)
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
