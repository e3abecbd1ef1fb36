//! Mirror core — persistent formatting state and the per-utterance
//! orchestrator.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{new_shared, MirrorError, MirrorOrchestrator, MirrorOutcome, SharedMirror};
pub use state::FormattingState;
