//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// MarkerConfig
// ---------------------------------------------------------------------------

/// Sentinel tokens that carry structural meaning in transcript text.
///
/// Both transcript producers (the live recognizer and the AI improvement
/// service) prefix certain lines with icon characters; which icon means what
/// is configuration data, not scattered literals. The structuring engine
/// receives a `MarkerConfig` and consults it for every classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Icons that introduce a speaker line (e.g. `👤 Konuşmacı 1 [00:01]: …`).
    pub speaker_icons: Vec<String>,
    /// Icons that introduce a structural heading (e.g. `📋 BAŞLIK: Toplantı`).
    pub heading_icons: Vec<String>,
    /// Case-insensitive prefixes of boilerplate lines the AI service wraps
    /// around its answers (stored lowercase).
    pub disclaimer_prefixes: Vec<String>,
    /// Words that mean "this is the title" in an icon heading — when the text
    /// before the colon is one of these, it is a marker, not a detail.
    pub title_words: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            speaker_icons: vec!["👤".into(), "🗣️".into()],
            heading_icons: vec!["📋".into(), "📝".into(), "📌".into()],
            disclaimer_prefixes: vec![
                "işte düzenlenmiş".into(),
                "işte iyileştirilmiş".into(),
                "bu transkript yapay zeka".into(),
            ],
            title_words: vec![
                "başlık".into(),
                "başlik".into(),
                "baslik".into(),
                "title".into(),
            ],
        }
    }
}

impl MarkerConfig {
    /// Strip a leading speaker icon; returns the rest of the line (without
    /// leading whitespace) or `None` when no configured icon is present.
    pub fn strip_speaker_icon<'a>(&self, line: &'a str) -> Option<&'a str> {
        strip_any_prefix(line, &self.speaker_icons)
    }

    /// Strip a leading heading icon; returns the rest of the line (without
    /// leading whitespace) or `None` when no configured icon is present.
    pub fn strip_heading_icon<'a>(&self, line: &'a str) -> Option<&'a str> {
        strip_any_prefix(line, &self.heading_icons)
    }

    /// Returns `true` when `line` starts with a known boilerplate prefix
    /// (case-insensitive).
    pub fn is_disclaimer(&self, line: &str) -> bool {
        let folded = fold_lower(line.trim());
        self.disclaimer_prefixes
            .iter()
            .any(|p| folded.starts_with(&fold_lower(p)))
    }

    /// Returns `true` when `word` is a configured "title" marker word
    /// (case-insensitive).
    pub fn is_title_word(&self, word: &str) -> bool {
        let folded = fold_lower(word.trim());
        self.title_words.iter().any(|w| fold_lower(w) == folded)
    }
}

fn strip_any_prefix<'a>(line: &'a str, prefixes: &[String]) -> Option<&'a str> {
    let trimmed = line.trim_start();
    prefixes
        .iter()
        .find_map(|icon| trimmed.strip_prefix(icon.as_str()))
        .map(|rest| rest.trim_start())
}

/// Locale-independent lowercase fold for marker comparisons.
///
/// Rust's `to_lowercase` turns Turkish `İ` into `i` + U+0307 (combining dot
/// above); dropping the combining dot lets `İşte` match the stored prefix
/// `işte`.
fn fold_lower(s: &str) -> String {
    s.to_lowercase().replace('\u{0307}', "")
}

// ---------------------------------------------------------------------------
// ImproveConfig
// ---------------------------------------------------------------------------

/// Settings for the AI transcript-improvement step.
///
/// The network client itself lives behind the `TranscriptImprover` trait;
/// these settings are handed to whichever implementation the host wires in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproveConfig {
    /// Whether improvement is attempted at all after a recording stops.
    pub enabled: bool,
    /// Primary transcript language as an ISO-639-1 code.
    pub language: String,
    /// Maximum seconds to wait for an improvement response.
    pub timeout_secs: u64,
}

impl Default for ImproveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "tr".into(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Default export behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export format name (`"markdown"`, `"text"` or `"json"`); parsed with
    /// `ExportFormat::from_str` at the export call site.
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "markdown".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_notes::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sentinel tables for transcript structuring.
    pub markers: MarkerConfig,
    /// AI improvement settings.
    pub improve: ImproveConfig,
    /// Export settings.
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
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

    // ---- MarkerConfig helpers ---

    #[test]
    fn strip_speaker_icon_removes_icon_and_space() {
        let markers = MarkerConfig::default();
        assert_eq!(
            markers.strip_speaker_icon("👤 Konuşmacı 1 [00:01]: Merhaba"),
            Some("Konuşmacı 1 [00:01]: Merhaba")
        );
    }

    #[test]
    fn strip_speaker_icon_without_icon_returns_none() {
        let markers = MarkerConfig::default();
        assert!(markers.strip_speaker_icon("Konuşmacı 1: Merhaba").is_none());
    }

    #[test]
    fn strip_heading_icon_does_not_match_speaker_icon() {
        let markers = MarkerConfig::default();
        assert!(markers.strip_heading_icon("👤 Konuşmacı 1: x").is_none());
        assert_eq!(
            markers.strip_heading_icon("📋 BAŞLIK: Toplantı"),
            Some("BAŞLIK: Toplantı")
        );
    }

    #[test]
    fn disclaimer_prefix_is_case_insensitive() {
        let markers = MarkerConfig::default();
        assert!(markers.is_disclaimer("İşte düzenlenmiş transkript:"));
        assert!(markers.is_disclaimer("işte düzenlenmiş metin"));
        assert!(!markers.is_disclaimer("Merhaba dünya"));
    }

    #[test]
    fn title_word_matches_all_spellings() {
        let markers = MarkerConfig::default();
        assert!(markers.is_title_word("BAŞLIK"));
        assert!(markers.is_title_word("Başlık"));
        assert!(markers.is_title_word("baslik"));
        assert!(markers.is_title_word("Title"));
        assert!(!markers.is_title_word("Tarih"));
    }

    // ---- TOML persistence ---

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.markers.speaker_icons, loaded.markers.speaker_icons);
        assert_eq!(original.markers.heading_icons, loaded.markers.heading_icons);
        assert_eq!(
            original.markers.disclaimer_prefixes,
            loaded.markers.disclaimer_prefixes
        );
        assert_eq!(original.improve.enabled, loaded.improve.enabled);
        assert_eq!(original.improve.language, loaded.improve.language);
        assert_eq!(original.improve.timeout_secs, loaded.improve.timeout_secs);
        assert_eq!(original.export.format, loaded.export.format);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.improve.language, default.improve.language);
        assert_eq!(config.markers.speaker_icons, default.markers.speaker_icons);
        assert_eq!(config.export.format, default.export.format);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.improve.enabled = false;
        cfg.improve.language = "en".into();
        cfg.improve.timeout_secs = 5;
        cfg.export.format = "json".into();
        cfg.markers.speaker_icons.push("🎙️".into());

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert!(!loaded.improve.enabled);
        assert_eq!(loaded.improve.language, "en");
        assert_eq!(loaded.improve.timeout_secs, 5);
        assert_eq!(loaded.export.format, "json");
        assert!(loaded.markers.speaker_icons.contains(&"🎙️".to_string()));
    }
}
