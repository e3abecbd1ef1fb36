//! Pure text transforms: normalization, command classification and
//! capitalization.
//!
//! Everything in this module is a deterministic function over strings (plus
//! the read-only [`FormattingState`] for capitalization) — no OS access, no
//! interior state.  The rule tables are French, matching the speech profile
//! the engine mirrors.
//!
//! [`FormattingState`]: crate::mirror::FormattingState

pub mod capitalize;
pub mod classify;
pub mod normalize;

pub use capitalize::capitalize;
pub use classify::is_command;
pub use normalize::{apply_directives, fix_spacing, normalize};
