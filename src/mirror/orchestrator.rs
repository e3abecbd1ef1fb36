//! Per-utterance pipeline: focus gate → classification → normalization →
//! inter-chunk spacing → capitalization → injection → tail-state update.
//!
//! The orchestrator owns the session's [`FormattingState`] and is the only
//! writer to it.  The state is updated strictly *after* a successful
//! injection; when the injector fails, the utterance is reported as an
//! error and the state is left exactly as it was, so the next utterance is
//! formatted as if the failed one never happened.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::config::{FocusConfig, FormattingConfig, MirrorConfig};
use crate::inject::{InjectError, InputBackend, TextInjector};
use crate::mirror::state::FormattingState;
use crate::text::{apply_directives, capitalize, fix_spacing, is_command, normalize};

// ---------------------------------------------------------------------------
// MirrorError
// ---------------------------------------------------------------------------

/// Errors surfaced while mirroring an utterance.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The injector could not deliver the text.  Nothing was recorded in
    /// the tail state for this utterance.
    #[error("injection failed: {0}")]
    Inject(#[from] InjectError),
}

// ---------------------------------------------------------------------------
// MirrorOutcome
// ---------------------------------------------------------------------------

/// What happened to one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// The utterance was formatted and injected; carries the exact text
    /// that was typed.
    Injected(String),
    /// The utterance matched the command classifier and was left to the
    /// command grammar.
    Command,
    /// Nothing to inject (empty or whitespace-only, before or after
    /// normalization).
    Empty,
    /// The focused application is not on the allow-list; the utterance was
    /// dropped without touching the tail state.
    FocusRejected,
}

// ---------------------------------------------------------------------------
// Leading-space rule
// ---------------------------------------------------------------------------

/// Characters that attach to the previous word: no automatic space is
/// inserted before a chunk starting with one of these.
const LEADING_PUNCT: &[char] = &[
    ',', '.', ';', ':', '!', '?', ')', ']', '}', '%', '»', '"', '\'',
];

fn needs_leading_space(state: &FormattingState, text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    state.has_injected
        && !state.ended_with_space
        && !state.ended_with_newline
        && !first.is_whitespace()
        && !LEADING_PUNCT.contains(&first)
}

// ---------------------------------------------------------------------------
// MirrorOrchestrator
// ---------------------------------------------------------------------------

/// One mirroring session: formatting state plus the injector that delivers
/// the formatted text.
pub struct MirrorOrchestrator {
    state: FormattingState,
    injector: TextInjector,
    backend: Arc<dyn InputBackend>,
    focus: FocusConfig,
    formatting: FormattingConfig,
}

/// Orchestrator behind the lock that serializes utterances and commands.
pub type SharedMirror = Arc<Mutex<MirrorOrchestrator>>;

impl MirrorOrchestrator {
    pub fn new(backend: Arc<dyn InputBackend>, config: &MirrorConfig) -> Self {
        Self {
            state: FormattingState::default(),
            injector: TextInjector::new(Arc::clone(&backend), &config.injection),
            backend,
            focus: config.focus.clone(),
            formatting: config.formatting.clone(),
        }
    }

    /// Run one raw recognizer utterance through the full pipeline.
    pub fn process(&mut self, raw: &str) -> Result<MirrorOutcome, MirrorError> {
        if raw.trim().is_empty() {
            return Ok(MirrorOutcome::Empty);
        }

        let foreground = self.backend.foreground_executable();
        if !self.focus.allows(foreground.as_deref()) {
            log::debug!("utterance dropped: foreground {foreground:?} not allowed");
            return Ok(MirrorOutcome::FocusRejected);
        }

        if is_command(raw) {
            log::debug!("utterance classified as command: {raw:?}");
            return Ok(MirrorOutcome::Command);
        }

        let mut text = if self.formatting.fix_spacing {
            normalize(raw)
        } else {
            apply_directives(raw)
        };
        if text.trim_matches(' ').is_empty() {
            return Ok(MirrorOutcome::Empty);
        }

        if self.formatting.auto_space && needs_leading_space(&self.state, &text) {
            text.insert(0, ' ');
            if self.formatting.fix_spacing {
                text = fix_spacing(&text);
            }
        }
        if self.formatting.auto_capitalize {
            text = capitalize(&self.state, &text);
        }

        self.injector.inject(&text)?;

        self.state.update(&text);
        self.state.has_injected = true;
        log::info!("injected {} chars", text.chars().count());
        Ok(MirrorOutcome::Injected(text))
    }

    /// Forget the tail state (focus moved to a fresh field).
    pub fn reset(&mut self) {
        self.state.reset();
        log::debug!("formatting state reset");
    }

    /// Current tail state, for the command layer (delete-last-word must
    /// re-sync spacing afterwards).
    pub fn state(&self) -> &FormattingState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormattingState {
        &mut self.state
    }

    pub fn backend(&self) -> &Arc<dyn InputBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for MirrorOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorOrchestrator")
            .field("state", &self.state)
            .field("injector", &self.injector)
            .finish_non_exhaustive()
    }
}

/// Build an orchestrator behind the session lock.
pub fn new_shared(backend: Arc<dyn InputBackend>, config: &MirrorConfig) -> SharedMirror {
    Arc::new(Mutex::new(MirrorOrchestrator::new(backend, config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
