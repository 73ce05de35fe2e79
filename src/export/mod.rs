//! Document export — renders a block sequence to Markdown, plain text or
//! JSON.
//!
//! Exports always work from blocks, never from normalized text directly, so
//! every format shows the same structure the UI shows. JSON is the only
//! format that carries the block kinds themselves; Markdown and plain text
//! are lossy presentations.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::structure::Block;

// ---------------------------------------------------------------------------
// ExportError
// ---------------------------------------------------------------------------

/// Errors surfaced when exporting a document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The format name was not recognised.
    #[error("unknown export format: {0:?} (expected markdown, text or json)")]
    UnknownFormat(String),

    /// JSON serialisation failed.
    #[error("failed to serialise blocks: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
    Json,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Parse a format name, case-insensitively. Accepts the extension
    /// spellings (`md`, `txt`) as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" | "plain" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `blocks` in the requested format.
pub fn render(blocks: &[Block], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Markdown => Ok(render_markdown(blocks)),
        ExportFormat::Text => Ok(render_text(blocks)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(blocks)?),
    }
}

fn render_markdown(blocks: &[Block]) -> String {
    let mut parts = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Heading { title, detail } => match detail {
                Some(detail) => parts.push(format!("## {title}\n\n{detail}")),
                None => parts.push(format!("## {title}")),
            },
            Block::SpeakerTurn {
                speaker,
                time,
                content,
            } => match time {
                Some(time) => parts.push(format!("**{speaker}** [{time}]: {content}")),
                None => parts.push(format!("**{speaker}**: {content}")),
            },
            Block::BulletList { items } => {
                let list: Vec<String> = items.iter().map(|i| format!("- {i}")).collect();
                parts.push(list.join("\n"));
            }
            Block::Paragraph { content } => parts.push(content.clone()),
        }
    }
    parts.join("\n\n")
}

fn render_text(blocks: &[Block]) -> String {
    let mut parts = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Heading { title, detail } => match detail {
                Some(detail) => parts.push(format!("{title}\n{detail}")),
                None => parts.push(title.clone()),
            },
            Block::SpeakerTurn {
                speaker,
                time,
                content,
            } => match time {
                Some(time) => parts.push(format!("{speaker} [{time}]: {content}")),
                None => parts.push(format!("{speaker}: {content}")),
            },
            Block::BulletList { items } => {
                let list: Vec<String> = items.iter().map(|i| format!("- {i}")).collect();
                parts.push(list.join("\n"));
            }
            Block::Paragraph { content } => parts.push(content.clone()),
        }
    }
    parts.join("\n\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting_blocks() -> Vec<Block> {
        vec![
            Block::heading("Toplantı"),
            Block::SpeakerTurn {
                speaker: "Konuşmacı 1".into(),
                time: Some("00:01".into()),
                content: "Merhaba".into(),
            },
            Block::BulletList {
                items: vec!["karar verildi".into(), "devam ediyoruz".into()],
            },
            Block::paragraph("Genel değerlendirme olumluydu."),
        ]
    }

    // ---- ExportFormat ---

    #[test]
    fn extensions_match_formats() {
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::Text.extension(), "txt");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }

    #[test]
    fn from_str_accepts_names_and_aliases() {
        assert_eq!("markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!(matches!(
            "pdf".parse::<ExportFormat>().unwrap_err(),
            ExportError::UnknownFormat(name) if name == "pdf"
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for format in [ExportFormat::Markdown, ExportFormat::Text, ExportFormat::Json] {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
    }

    // ---- Markdown ---

    #[test]
    fn markdown_renders_all_block_kinds() {
        let out = render(&meeting_blocks(), ExportFormat::Markdown).unwrap();
        assert_eq!(
            out,
            "## Toplantı\n\n\
             **Konuşmacı 1** [00:01]: Merhaba\n\n\
             - karar verildi\n- devam ediyoruz\n\n\
             Genel değerlendirme olumluydu."
        );
    }

    #[test]
    fn markdown_speaker_turn_without_time_omits_brackets() {
        let blocks = vec![Block::SpeakerTurn {
            speaker: "Konuşmacı 2".into(),
            time: None,
            content: "Katılıyorum".into(),
        }];
        assert_eq!(
            render(&blocks, ExportFormat::Markdown).unwrap(),
            "**Konuşmacı 2**: Katılıyorum"
        );
    }

    #[test]
    fn markdown_heading_with_detail() {
        let blocks = vec![Block::Heading {
            title: "Özet".into(),
            detail: Some("Kısa toplantı".into()),
        }];
        assert_eq!(
            render(&blocks, ExportFormat::Markdown).unwrap(),
            "## Özet\n\nKısa toplantı"
        );
    }

    // ---- Text ---

    #[test]
    fn text_renders_without_markup() {
        let out = render(&meeting_blocks(), ExportFormat::Text).unwrap();
        assert!(!out.contains('*'));
        assert!(!out.contains('#'));
        assert!(out.starts_with("Toplantı\n\nKonuşmacı 1 [00:01]: Merhaba"));
    }

    // ---- JSON ---

    #[test]
    fn json_carries_block_kinds() {
        let out = render(&meeting_blocks(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let kinds: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["heading", "speaker_turn", "bullet_list", "paragraph"]);
    }

    #[test]
    fn empty_block_list_renders_empty() {
        assert_eq!(render(&[], ExportFormat::Markdown).unwrap(), "");
        assert_eq!(render(&[], ExportFormat::Text).unwrap(), "");
        assert_eq!(render(&[], ExportFormat::Json).unwrap(), "[]");
    }
}
