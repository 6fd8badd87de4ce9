// crates/hardness-core/src/renderer.rs
//! Best-effort rendering of normalized model text into an HTML fragment.
//!
//! This is presentation-layer structure inference, not a parser: label
//! detection and list handling are heuristics, and any line that matches
//! nothing passes through as plain paragraph text. It never fails on
//! arbitrary input. Numeric score extraction lives in `scoring` and stays
//! independent of these patterns.

use crate::normalizer::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

/// Rendered when the input is empty or whitespace-only.
pub const NO_DATA_PLACEHOLDER: &str = "<p class=\"no-data\">No data available</p>";

/// Domain section headers promoted to sub-headings when a line consists of
/// exactly one of them (optionally with a trailing colon).
const SECTION_HEADERS: &[&str] = &[
    "Current System",
    "Inputs",
    "Outputs",
    "Pain Points",
    "Overall Difficulty Score",
    "Hardness Level",
    "SME Justification",
    "Summary",
    "Key Takeaways",
];

static NUMBERED_WITH_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+\.\s+[^:]+):\s*(.*)$").unwrap());
static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s+.+$").unwrap());
static BULLET_WITH_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\u{2022}|\d+\.)\s*([^:]+):\s*(.*)$").unwrap());
static LABEL_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([^:]+):\s*(.*)$").unwrap());
static LIST_ITEM_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\u{2022}|-|\d+\.)\s+").unwrap());
static CONTINUATION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\s+|[a-z])").unwrap());
static EXCESS_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<br>\s*){3,}").unwrap());

/// Render normalized text into labeled HTML sections. `extra_labels` are
/// per-stage keyword patterns bolded wherever they occur (plain keywords are
/// escaped; anything containing regex metacharacters is used as a pattern).
pub fn render(text: &str, extra_labels: &[&str]) -> String {
    let clean = normalize(text);
    if clean.is_empty() {
        return NO_DATA_PLACEHOLDER.to_string();
    }

    let extra_patterns: Vec<Regex> = extra_labels
        .iter()
        .filter_map(|label| compile_label_pattern(label))
        .collect();

    let lines: Vec<&str> = clean.lines().collect();
    let mut entries: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();
        if line.trim().is_empty() {
            entries.push(String::new());
            i += 1;
            continue;
        }

        if let Some(header) = match_section_header(line) {
            entries.push(format!("<h4>{}</h4>", header));
            i += 1;
            continue;
        }

        if let Some(bolded) = apply_extra_patterns(line, &extra_patterns) {
            entries.push(bolded);
            i += 1;
            continue;
        }

        if let Some(caps) = NUMBERED_WITH_COLON.captures(line) {
            let heading = caps[1].trim().to_string();
            let remainder = caps[2].trim();
            entries.push(if remainder.is_empty() {
                format!("<strong>{}:</strong>", heading)
            } else {
                format!("<strong>{}:</strong> {}", heading, remainder)
            });
            i += 1;
            continue;
        }

        if NUMBERED_LINE.is_match(line) {
            let (block, next) = collect_continuation(&lines, i);
            entries.push(format!("<strong>{}</strong>", block.join("<br>")));
            i = next;
            continue;
        }

        if let Some(caps) = BULLET_WITH_COLON.captures(line) {
            let heading = caps[1].trim().to_string();
            let remainder = caps[2].trim();
            entries.push(if remainder.is_empty() {
                format!("\u{2022} <strong>{}:</strong>", heading)
            } else {
                format!("\u{2022} <strong>{}:</strong> {}", heading, remainder)
            });
            i += 1;
            continue;
        }

        // "Label: value" with a short label and no internal colon
        if let Some(caps) = LABEL_LINE.captures(line) {
            let label = caps[1].trim();
            if label.split_whitespace().count() <= 8 {
                let value = caps[2].trim();
                entries.push(if value.is_empty() {
                    format!("<strong>{}:</strong>", label)
                } else {
                    format!("<strong>{}:</strong> {}", label, value)
                });
                i += 1;
                continue;
            }
        }

        entries.push(line.trim_start().to_string());
        i += 1;
    }

    let html = wrap_paragraphs(&entries);
    EXCESS_BREAKS.replace_all(&html, "<br><br>").to_string()
}

fn compile_label_pattern(label: &str) -> Option<Regex> {
    let has_meta = label
        .chars()
        .any(|c| r".^$*+?{}[]\|()".contains(c));
    let pattern = if has_meta {
        format!("(?i){}", label)
    } else {
        format!("(?i){}", regex::escape(label))
    };
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(_) => Regex::new(&format!("(?i){}", regex::escape(label))).ok(),
    }
}

fn match_section_header(line: &str) -> Option<&'static str> {
    let trimmed = line.trim().trim_end_matches(':').trim();
    SECTION_HEADERS
        .iter()
        .find(|h| h.eq_ignore_ascii_case(trimmed))
        .copied()
}

fn apply_extra_patterns(line: &str, patterns: &[Regex]) -> Option<String> {
    let mut current = line.to_string();
    let mut changed = false;
    for pattern in patterns {
        let next = pattern
            .replace_all(&current, "<strong>$0</strong>")
            .to_string();
        if next != current {
            changed = true;
            current = next;
        }
    }
    changed.then_some(current)
}

/// Fold indented or lowercase-starting lines into the block that opened
/// them, stopping at blank lines and new list items.
fn collect_continuation<'a>(lines: &[&'a str], start: usize) -> (Vec<&'a str>, usize) {
    let mut block = vec![lines[start].trim()];
    let mut j = start + 1;
    while j < lines.len() {
        let next = lines[j];
        if next.trim().is_empty() || LIST_ITEM_START.is_match(next) {
            break;
        }
        if CONTINUATION_START.is_match(next) {
            block.push(next.trim());
            j += 1;
            continue;
        }
        break;
    }
    (block, j)
}

fn wrap_paragraphs(entries: &[String]) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for entry in entries {
        if entry.is_empty() {
            flush_paragraph(&mut paragraphs, &mut current);
        } else if entry.starts_with("<h4") {
            flush_paragraph(&mut paragraphs, &mut current);
            paragraphs.push(entry.clone());
        } else {
            current.push(entry);
        }
    }
    flush_paragraph(&mut paragraphs, &mut current);

    paragraphs.join("\n")
}

fn flush_paragraph(paragraphs: &mut Vec<String>, current: &mut Vec<&str>) {
    if !current.is_empty() {
        paragraphs.push(format!(
            "<p style='margin:6px 0; line-height:1.45;'>{}</p>",
            current.join("<br>")
        ));
        current.clear();
    }
}
