//! Configuration module for Voice Notes.
//!
//! Provides `AppConfig` (top-level settings), `MarkerConfig` (the sentinel
//! tables driving transcript structuring), `AppPaths` for cross-platform
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ExportConfig, ImproveConfig, MarkerConfig};
