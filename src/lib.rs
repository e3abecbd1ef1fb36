//! voice-mirror — live dictation mirroring engine.
//!
//! Takes finalized speech-recognition utterances, decides whether each one
//! is a voice command or literal dictation, reformats dictation text
//! (punctuation spacing, spoken newline/tab directives, automatic
//! capitalization and inter-chunk spacing) and injects the result as
//! synthetic keystrokes into whatever application currently has input
//! focus.  A bounded content-based cursor search ([`locate`]) selects a
//! word left or right of the caret by spoken content.
//!
//! # Architecture
//!
//! ```text
//! recognizer callback
//!   └─▶ MirrorSession (grammar)
//!         ├─ dictation ─▶ MirrorOrchestrator (mirror)
//!         │                 classify → normalize → space → capitalize
//!         │                 → TextInjector (inject) → FormattingState
//!         └─ commands  ─▶ CommandTable → strokes / WordLocator (locate)
//!                                            │
//!                                InputBackend (enigo + arboard)
//! ```
//!
//! The speech runtime, the windowing subsystem and the microphone are
//! external collaborators reached only through the [`inject::InputBackend`]
//! and [`grammar::MicControl`] seams, so the whole engine is testable
//! against an in-memory edit buffer.

pub mod config;
pub mod grammar;
pub mod inject;
pub mod locate;
pub mod mirror;
pub mod text;

pub use config::{AppPaths, MirrorConfig};
pub use grammar::{Command, CommandTable, MicControl, MirrorSession, SessionOutcome};
pub use inject::{InjectError, InjectionMode, InputBackend, Stroke, SystemBackend, TextInjector};
pub use locate::{Direction, WordLocator};
pub use mirror::{FormattingState, MirrorError, MirrorOrchestrator, MirrorOutcome};
pub use text::{capitalize, is_command, normalize};
