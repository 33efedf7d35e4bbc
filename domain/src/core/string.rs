//! Small string helpers shared with the presentation layer.

/// Shortens `s` to at most `max_chars` characters for single-line display,
/// appending `…` when anything was cut.
///
/// Counts characters rather than bytes, so multi-byte text is never split
/// mid-character.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
