//! Inline markdown emphasis removal.
//!
//! The AI improvement service decorates text with `*` emphasis; neither the
//! preview nor the document exporter wants it. Emphasis wrappers are
//! unwrapped (content kept), stray asterisks removed, and whitespace
//! normalised. Every `title`/`content`/bullet string entering a
//! [`Block`](crate::structure::Block) goes through this function first.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{3}([^*]+)\*{3}").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{2}([^*]+)\*{2}").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Remove `***`, `**` and `*` emphasis wrappers (keeping their content),
/// drop any stray asterisks left over, collapse runs of 2+ spaces to one,
/// and trim the result.
///
/// ```
/// use voice_notes::structure::strip_markdown;
///
/// assert_eq!(strip_markdown("**iyi günler**"), "iyi günler");
/// assert_eq!(strip_markdown("*a*  b"), "a b");
/// ```
pub fn strip_markdown(text: &str) -> String {
    let text = BOLD_ITALIC.replace_all(text, "$1");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = text.replace('*', "");
    MULTI_SPACE.replace_all(&text, " ").trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
