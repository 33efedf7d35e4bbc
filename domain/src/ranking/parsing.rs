//! Free-text ranking extraction
//!
//! Stage-2 prompts instruct every evaluator to end with a literal
//! `FINAL RANKING:` header followed by a numbered list of labels. Models
//! mostly comply, sometimes loosely (markdown emphasis, `1)` instead of
//! `1.`, prose around the list), so parsing is best-effort and total:
//! any text in, a possibly empty label list out, never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::deliberation::Label;

/// Header evaluators are told to emit before their ranked list
pub const RANKING_MARKER: &str = "FINAL RANKING";

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)final\s+ranking").expect("invalid marker regex"));

static NUMBERED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+\s*[.):\-]\s*(.+)$").expect("invalid numbered line regex")
});

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bresponse\s+([A-Za-z]+)\b").expect("invalid label regex"));

/// Extract a ranking from an evaluator's raw text
///
/// Primary strategy: locate the `FINAL RANKING` marker (last occurrence
/// wins when a model repeats the header) and read one label per numbered
/// line after it. Fallback, used only when the primary finds nothing:
/// scan the whole text for label mentions in appearance order. Either
/// way the output is duplicate-free, keeps first appearances, and drops
/// labels the evaluator was never shown.
pub fn parse_ranking(text: &str, known_labels: &[Label]) -> Vec<Label> {
    let primary = parse_after_marker(text, known_labels);
    if !primary.is_empty() {
        return primary;
    }
    scan_label_mentions(text, known_labels)
}

fn parse_after_marker(text: &str, known_labels: &[Label]) -> Vec<Label> {
    let Some(marker) = MARKER_RE.find_iter(text).last() else {
        return Vec::new();
    };
    let tail = &text[marker.end()..];

    let mut ranking = Vec::new();
    for line in NUMBERED_LINE_RE.captures_iter(tail) {
        if let Some(label) = first_known_label(&line[1], known_labels)
            && !ranking.contains(&label)
        {
            ranking.push(label);
        }
    }
    ranking
}

fn scan_label_mentions(text: &str, known_labels: &[Label]) -> Vec<Label> {
    let mut ranking = Vec::new();
    for caps in LABEL_RE.captures_iter(text) {
        if let Some(label) = canonical_label(&caps[1], known_labels)
            && !ranking.contains(&label)
        {
            ranking.push(label);
        }
    }
    ranking
}

fn first_known_label(line: &str, known_labels: &[Label]) -> Option<Label> {
    LABEL_RE
        .captures_iter(line)
        .find_map(|caps| canonical_label(&caps[1], known_labels))
}

fn canonical_label(letters: &str, known_labels: &[Label]) -> Option<Label> {
    let candidate = Label::new(format!("Response {}", letters.to_uppercase()));
    known_labels.contains(&candidate).then_some(candidate)
}
