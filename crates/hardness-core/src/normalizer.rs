// crates/hardness-core/src/normalizer.rs
//! Cleans raw reasoning-service text into a canonical line-oriented form.
//!
//! `normalize` is pure and idempotent: running it twice yields the same
//! string. The steps run in a fixed order because later patterns assume the
//! earlier cleanup already happened (tag stripping runs before whitespace
//! collapsing so it cannot reintroduce double spaces).

use once_cell::sync::Lazy;
use regex::Regex;

// The reasoning service sometimes emits a stray lone "s" token at the start
// of a line. This is a quirk of that specific upstream, not a general rule.
static STRAY_S_LEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:s\s+)+").unwrap());
static STRAY_S_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:\s*s\s+)+").unwrap());

static ANSWER_EXPLANATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Q\d+\s*Answer\s*Explanation\s*:").unwrap());
static LINE_SCAFFOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:(?:answer|question[ \t]*\d+)[ \t]*:[ \t]*)+").unwrap()
});

static MD_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static MD_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static MD_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());
static MD_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#+\s*").unwrap());
static MD_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());
static MD_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+>").unwrap());
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static EXCESS_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
// [ \t] only: \s would swallow the blank line separating a list from the
// paragraph above it.
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]+").unwrap());

/// The canonical bullet glyph every `-`/`*` list marker is folded into.
pub const BULLET: &str = "\u{2022} ";

/// Strip markdown artifacts, scaffolding labels, and upstream quirks from
/// raw model output.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = strip_scaffolding(text.trim());

    let text = MD_BOLD.replace_all(&text, "$1");
    let text = MD_EMPHASIS.replace_all(&text, "$1");
    let text = MD_CODE.replace_all(&text, "$1");
    let text = MD_HEADING.replace_all(&text, "");
    let text = MD_IMAGE.replace_all(&text, "");
    let text = MD_LINK.replace_all(&text, "$1");

    let text = HTML_TAG.replace_all(&text, "");

    // Markdown and tag stripping can expose scaffolding that was wrapped in
    // it (e.g. "**Answer:** x"), so the scaffold battery runs again.
    let text = strip_scaffolding(&text);
    let text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n");
    let text = EXCESS_SPACES.replace_all(&text, " ");
    let text = BULLET_MARKER.replace_all(&text, BULLET);

    text.trim().to_string()
}

fn strip_scaffolding(text: &str) -> String {
    let text = STRAY_S_LEAD.replace(text, "");
    let text = STRAY_S_LINE.replace_all(&text, "\n");
    let text = ANSWER_EXPLANATION.replace_all(&text, "");
    let text = LINE_SCAFFOLD.replace_all(&text, "");
    text.replace("& Key Takeaway:", "Key Takeaway:")
}
