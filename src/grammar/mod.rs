//! Recognition grammar — the spoken-command vocabulary and the session
//! object that speech-runtime callbacks drive.

pub mod commands;
pub mod session;

pub use commands::{Command, CommandTable};
pub use session::{MicControl, MirrorSession, NoMicControl, SessionOutcome};
