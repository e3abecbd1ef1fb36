//! Session front door — what the speech runtime calls.
//!
//! [`MirrorSession`] receives finalized recognition results, resolves
//! voice commands through the [`CommandTable`] and routes everything else
//! to the mirroring pipeline.  One internal lock serializes utterances and
//! commands, so recognizer callbacks may arrive from any thread.
//!
//! Recognizer callbacks must never unwind into the host runtime, so every
//! failure here is logged and absorbed: a failed utterance is a no-op and
//! the next one proceeds from unchanged state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, MutexGuard};

use crate::config::MirrorConfig;
use crate::inject::{InputBackend, Stroke};
use crate::locate::{Direction, WordLocator};
use crate::mirror::{new_shared, MirrorError, MirrorOrchestrator, MirrorOutcome, SharedMirror};

use super::commands::{Command, CommandTable};

// ---------------------------------------------------------------------------
// MicControl
// ---------------------------------------------------------------------------

/// Host hook for the sleep/wake commands: tell the recognizer runtime to
/// mute or resume the microphone.  Both methods default to no-ops for
/// hosts without microphone control.
pub trait MicControl: Send + Sync {
    fn sleep(&self) {}
    fn wake(&self) {}
}

/// [`MicControl`] that does nothing; sleep/wake then only gate mirroring.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMicControl;

impl MicControl for NoMicControl {}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn MicControl>) {}
};

// ---------------------------------------------------------------------------
// SessionOutcome
// ---------------------------------------------------------------------------

/// What one recognition result turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Routed through the mirroring pipeline.
    Dictated(MirrorOutcome),
    /// Resolved and executed as a command.
    Executed(Command),
    /// Dropped because the session is asleep.
    Asleep,
    /// Something went wrong; the error was logged and nothing changed.
    Failed,
}

// ---------------------------------------------------------------------------
// MirrorSession
// ---------------------------------------------------------------------------

/// Thread-safe entry point tying the command table, the word locator and
/// the mirroring pipeline together.
pub struct MirrorSession {
    mirror: SharedMirror,
    locator: WordLocator,
    table: CommandTable,
    mic: Arc<dyn MicControl>,
    asleep: AtomicBool,
}

impl MirrorSession {
    /// Session without microphone control (sleep/wake only gate mirroring).
    pub fn new(backend: Arc<dyn InputBackend>, config: &MirrorConfig) -> Self {
        Self::with_mic(backend, config, Arc::new(NoMicControl))
    }

    pub fn with_mic(
        backend: Arc<dyn InputBackend>,
        config: &MirrorConfig,
        mic: Arc<dyn MicControl>,
    ) -> Self {
        Self {
            mirror: new_shared(Arc::clone(&backend), config),
            locator: WordLocator::new(backend, &config.locator),
            table: CommandTable::new(),
            mic,
            asleep: AtomicBool::new(false),
        }
    }

    /// Handle a recognition result delivered as separate words.
    pub fn on_words(&self, words: &[String]) -> SessionOutcome {
        self.on_utterance(&words.join(" "))
    }

    /// Handle one finalized utterance: command phrases execute, everything
    /// else is mirrored.  Never panics; failures are logged.
    pub fn on_utterance(&self, raw: &str) -> SessionOutcome {
        let command = self.table.parse(raw);

        if self.asleep.load(Ordering::SeqCst) {
            // Only the wake phrase gets through while asleep.
            if command == Some(Command::Wake) {
                return self.run(Command::Wake);
            }
            log::debug!("asleep: dropping {raw:?}");
            return SessionOutcome::Asleep;
        }

        match command {
            Some(command) => self.run(command),
            None => {
                let mut mirror = self.lock();
                match mirror.process(raw) {
                    Ok(outcome) => SessionOutcome::Dictated(outcome),
                    Err(e) => {
                        log::error!("mirroring failed for {raw:?}: {e}");
                        SessionOutcome::Failed
                    }
                }
            }
        }
    }

    /// Execute an already-resolved command.
    pub fn run(&self, command: Command) -> SessionOutcome {
        match self.execute(&command) {
            Ok(()) => SessionOutcome::Executed(command),
            Err(e) => {
                log::error!("command {command:?} failed: {e}");
                SessionOutcome::Failed
            }
        }
    }

    /// Forget the formatting tail (caret moved to a fresh field).
    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep.load(Ordering::SeqCst)
    }

    fn execute(&self, command: &Command) -> Result<(), MirrorError> {
        // The mirror lock is held for the whole command so key sequences
        // never interleave with dictation injection.
        let mut mirror = self.lock();
        let backend = Arc::clone(mirror.backend());

        match command {
            Command::NewLine => {
                backend.tap(Stroke::Enter).map_err(MirrorError::Inject)?;
                mirror.state_mut().update("\n");
            }
            Command::NewParagraph => {
                backend.tap(Stroke::Enter).map_err(MirrorError::Inject)?;
                backend.tap(Stroke::Enter).map_err(MirrorError::Inject)?;
                mirror.state_mut().update("\n\n");
            }
            Command::Tab => {
                backend.tap(Stroke::Tab).map_err(MirrorError::Inject)?;
                mirror.state_mut().update("\t");
            }
            Command::DeleteLastWord => {
                backend
                    .tap(Stroke::DeleteWordBack)
                    .map_err(MirrorError::Inject)?;
                // The word is gone but its leading space survives a
                // word-delete in common edit controls.
                let state = mirror.state_mut();
                state.ended_with_space = true;
                state.ended_with_newline = false;
                state.ended_sentence = false;
            }
            Command::SelectAll => {
                backend.tap(Stroke::SelectAll).map_err(MirrorError::Inject)?;
            }
            Command::SelectPrevWord => {
                backend
                    .tap(Stroke::ExtendWordLeft)
                    .map_err(MirrorError::Inject)?;
            }
            Command::SelectNextWord => {
                backend
                    .tap(Stroke::ExtendWordRight)
                    .map_err(MirrorError::Inject)?;
            }
            Command::SelectWordLeft(target) => {
                let found = self.locator.select_word(Direction::Left, target)?;
                if !found {
                    log::info!("{target:?} not found left of the caret");
                }
            }
            Command::SelectWordRight(target) => {
                let found = self.locator.select_word(Direction::Right, target)?;
                if !found {
                    log::info!("{target:?} not found right of the caret");
                }
            }
            Command::Sleep => {
                self.asleep.store(true, Ordering::SeqCst);
                self.mic.sleep();
                log::info!("mirroring asleep");
            }
            Command::Wake => {
                self.asleep.store(false, Ordering::SeqCst);
                self.mic.wake();
                log::info!("mirroring awake");
            }
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, MirrorOrchestrator> {
        match self.mirror.lock() {
            Ok(guard) => guard,
            // A panicked utterance left the lock poisoned; the state is
            // still coherent because it is only written post-injection.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for MirrorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorSession")
            .field("asleep", &self.is_asleep())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
