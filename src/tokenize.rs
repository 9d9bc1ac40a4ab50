//! Word tokenization utility.
//!
//! Splits free text into an ordered sequence of word tokens: whitespace
//! separates chunks, and leading/trailing punctuation is detached into
//! its own tokens so that `"Paris."` yields `["Paris", "."]`. Internal
//! apostrophes and hyphens stay attached (`"O'Brien"`, `"co-op"`).
//!
//! The dictionary tagger uses this both to split generated sentences and
//! to re-split merged mention units, so the same function must be used on
//! both sides.

/// Tokenize text into plain words.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in text.split_whitespace() {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        let mut end = chars.len();
        while start < end && is_detachable(chars[start]) {
            start += 1;
        }
        while end > start && is_detachable(chars[end - 1]) {
            end -= 1;
        }
        for &c in &chars[..start] {
            out.push(c.to_string());
        }
        if start < end {
            out.push(chars[start..end].iter().collect());
        }
        for &c in &chars[end..] {
            out.push(c.to_string());
        }
    }
    out
}

/// Punctuation that is split off at word boundaries.
fn is_detachable(c: char) -> bool {
    match c {
        '\'' | '-' => false,
        c => c.is_ascii_punctuation(),
    }
}
