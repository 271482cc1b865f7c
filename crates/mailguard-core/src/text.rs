//! Deterministic text preparation utilities
//!
//! All functions here are pure. Sentence splitting is intentionally naive:
//! it splits after `.`, `!`, or `?` followed by whitespace and does not
//! special-case abbreviations or quoted punctuation. Linguistic accuracy is
//! out of scope; independent per-sentence scrutiny is the goal.

/// Collapse runs of whitespace to single spaces and trim the ends.
///
/// Inference backends score cleaner on collapsed text, and downstream
/// length thresholds assume it.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into sentence-like units.
///
/// A boundary is the position immediately after `.`, `!`, or `?` when the
/// next character is whitespace. Results are trimmed; empty results are
/// dropped. Input without terminal punctuation yields a single element
/// containing the trimmed input.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                let sentence = text[start..next_idx].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = next_idx;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Cap a span at `max_chars` characters, respecting UTF-8 boundaries.
pub fn truncate_span(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
