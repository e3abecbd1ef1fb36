//! Configuration module for the dictation mirror.
//!
//! Provides `MirrorConfig` (top-level settings), sub-configs for each
//! subsystem, `AppPaths` for cross-platform data directories, and TOML
//! persistence via `MirrorConfig::load` / `MirrorConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    FocusConfig, FormattingConfig, InjectionConfig, LocatorConfig, MirrorConfig,
};
