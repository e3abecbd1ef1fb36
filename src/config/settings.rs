//! Mirror settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across
//! threads.  Defaults reproduce the behaviour of the reference grammar:
//! slow character-stream injection, browser-only operation, every
//! auto-format feature on.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::inject::InjectionMode;

// ---------------------------------------------------------------------------
// InjectionConfig
// ---------------------------------------------------------------------------

/// Settings for the injection backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Injection strategy.
    pub mode: InjectionMode,
    /// Milliseconds between key events in CharacterStream mode.
    pub keystroke_delay_ms: u64,
    /// Milliseconds after a clipboard write before the paste shortcut, so
    /// the clipboard manager flushes before the target reads it.
    pub clipboard_settle_ms: u64,
    /// Milliseconds after the paste shortcut before the clipboard restore,
    /// so the target finishes pasting before we clobber the clipboard.
    pub paste_settle_ms: u64,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            mode: InjectionMode::CharacterStream,
            keystroke_delay_ms: 10,
            clipboard_settle_ms: 50,
            paste_settle_ms: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// FocusConfig
// ---------------------------------------------------------------------------

/// Foreground-application gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// When true, the whole pipeline is a no-op unless the foreground
    /// executable is on the allow-list.
    pub exclusive_to_target: bool,
    /// Executable names without extension; matching is case-insensitive
    /// and tolerates a trailing `.exe`.
    pub allowed_executables: Vec<String>,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            exclusive_to_target: true,
            allowed_executables: vec!["chrome".into(), "msedge".into(), "firefox".into()],
        }
    }
}

impl FocusConfig {
    /// Whether `exe` (as reported by the windowing layer) passes the gate.
    /// `None` — no windowing query available — is rejected in exclusive
    /// mode.
    pub fn allows(&self, exe: Option<&str>) -> bool {
        if !self.exclusive_to_target {
            return true;
        }
        let Some(exe) = exe else {
            return false;
        };
        let exe = exe.to_lowercase();
        let stem = exe.strip_suffix(".exe").unwrap_or(&exe);
        self.allowed_executables
            .iter()
            .any(|allowed| allowed.to_lowercase() == stem)
    }
}

// ---------------------------------------------------------------------------
// FormattingConfig
// ---------------------------------------------------------------------------

/// Toggles for the dictation auto-format features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattingConfig {
    /// Repair punctuation spacing before injection.
    pub fix_spacing: bool,
    /// Capitalize sentence starts automatically.
    pub auto_capitalize: bool,
    /// Prepend a space between consecutive dictation chunks when needed.
    pub auto_space: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            fix_spacing: true,
            auto_capitalize: true,
            auto_space: true,
        }
    }
}

// ---------------------------------------------------------------------------
// LocatorConfig
// ---------------------------------------------------------------------------

/// Settings for the selection-by-content word search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Maximum words probed before the search rolls back.
    pub max_attempts: usize,
    /// Milliseconds between caret moves, letting the target application
    /// apply each synthetic key before the next one arrives.
    pub step_delay_ms: u64,
    /// Milliseconds between the copy shortcut and the clipboard read —
    /// probing too fast reads stale selection content.
    pub probe_settle_ms: u64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            step_delay_ms: 6,
            probe_settle_ms: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// MirrorConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level mirror configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_mirror::config::MirrorConfig;
///
/// // Load (returns Default when file is missing)
/// let config = MirrorConfig::load().unwrap();
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Injection backend settings.
    pub injection: InjectionConfig,
    /// Foreground-application gate.
    pub focus: FocusConfig,
    /// Auto-format toggles.
    pub formatting: FormattingConfig,
    /// Word-locator settings.
    pub locator: LocatorConfig,
}

impl MirrorConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(MirrorConfig::default())` when the file does not exist
    /// yet so callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_values() {
        let cfg = MirrorConfig::default();
        assert_eq!(cfg.injection.mode, InjectionMode::CharacterStream);
        assert_eq!(cfg.injection.keystroke_delay_ms, 10);
        assert!(cfg.focus.exclusive_to_target);
        assert_eq!(cfg.focus.allowed_executables.len(), 3);
        assert!(cfg.formatting.auto_capitalize);
        assert_eq!(cfg.locator.max_attempts, 12);
    }

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut original = MirrorConfig::default();
        original.injection.mode = InjectionMode::Hybrid;
        original.injection.keystroke_delay_ms = 5;
        original.focus.exclusive_to_target = false;
        original.focus.allowed_executables = vec!["notepad".into()];
        original.locator.max_attempts = 6;

        original.save_to(&path).expect("save");
        let loaded = MirrorConfig::load_from(&path).expect("load");

        assert_eq!(loaded.injection.mode, InjectionMode::Hybrid);
        assert_eq!(loaded.injection.keystroke_delay_ms, 5);
        assert!(!loaded.focus.exclusive_to_target);
        assert_eq!(loaded.focus.allowed_executables, vec!["notepad"]);
        assert_eq!(loaded.locator.max_attempts, 6);
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = MirrorConfig::load_from(&path).expect("should not error");
        assert_eq!(
            config.injection.mode,
            MirrorConfig::default().injection.mode
        );
        assert_eq!(config.locator.max_attempts, 12);
    }

    #[test]
    fn focus_gate_matching() {
        let focus = FocusConfig::default();
        assert!(focus.allows(Some("chrome")));
        assert!(focus.allows(Some("CHROME.EXE")));
        assert!(focus.allows(Some("msedge.exe")));
        assert!(!focus.allows(Some("notepad.exe")));
        assert!(!focus.allows(None));
    }

    #[test]
    fn non_exclusive_mode_allows_everything() {
        let focus = FocusConfig {
            exclusive_to_target: false,
            ..FocusConfig::default()
        };
        assert!(focus.allows(Some("notepad")));
        assert!(focus.allows(None));
    }
}
