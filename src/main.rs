//! Development harness — Voice Mirror.
//!
//! Stands in for the speech runtime: each stdin line plays the role of one
//! finalized recognition result and is fed to [`MirrorSession`], which
//! injects into whatever application holds input focus.  This is the same
//! entry surface a recognizer integration drives, so the whole pipeline
//! (classification, normalization, capitalization, injection, commands)
//! can be exercised end to end without a microphone.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`MirrorConfig`] from disk (returns default on first run).
//! 3. Build the [`SystemBackend`] and the [`MirrorSession`].
//! 4. Read utterances from stdin until EOF.
//!
//! Harness directives (not recognizer input): `:reset` clears the
//! formatting tail, `:quit` exits.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use voice_mirror::{
    InputBackend, MirrorConfig, MirrorOutcome, MirrorSession, SessionOutcome, SystemBackend,
};

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Voice Mirror harness starting up");

    // 2. Configuration
    let config = MirrorConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        MirrorConfig::default()
    });

    // 3. Session over the real input backend
    let backend: Arc<dyn InputBackend> = Arc::new(SystemBackend::new());
    if config.focus.exclusive_to_target && backend.foreground_executable().is_none() {
        log::warn!(
            "foreground detection unavailable on this backend; every utterance will be \
             rejected — set focus.exclusive_to_target = false to mirror everywhere"
        );
    }
    let session = MirrorSession::new(backend, &config);

    eprintln!("Each line is treated as one utterance (:reset, :quit).");
    eprintln!("Focus the target application before pressing Enter.");

    // 4. Utterance loop
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let utterance = line.trim();

        match utterance {
            ":quit" => break,
            ":reset" => {
                session.reset();
                eprintln!("-- tail state reset");
                continue;
            }
            "" => continue,
            _ => {}
        }

        match session.on_utterance(utterance) {
            SessionOutcome::Dictated(MirrorOutcome::Injected(text)) => {
                eprintln!("-- injected {text:?}");
            }
            SessionOutcome::Dictated(MirrorOutcome::Command) => {
                eprintln!("-- classified as external command, skipped");
            }
            SessionOutcome::Dictated(MirrorOutcome::Empty) => {
                eprintln!("-- nothing to inject");
            }
            SessionOutcome::Dictated(MirrorOutcome::FocusRejected) => {
                eprintln!("-- focused application not on the allow-list");
            }
            SessionOutcome::Executed(command) => {
                eprintln!("-- executed {command:?}");
            }
            SessionOutcome::Asleep => {
                eprintln!("-- asleep (say « au travail » to resume)");
            }
            SessionOutcome::Failed => {
                eprintln!("-- failed, see log");
            }
        }
        io::stderr().flush().ok();
    }

    log::info!("Voice Mirror harness shutting down");
    Ok(())
}
