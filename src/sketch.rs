//! Masked sketch construction.
//!
//! A sketch is a partially-masked rendering of a text used as an infill
//! generation prompt. Keywords are supplied by an external
//! [`KeywordExtractor`] collaborator; this module only decides which
//! characters of the original text survive and where mask tokens go.
//!
//! # Templates
//!
//! - [`SketchTemplate::KeywordsByImportance`]: keywords joined in the
//!   extractor's ranking order. Ablation baseline.
//! - [`SketchTemplate::KeywordsByPosition`]: keywords re-sorted by first
//!   occurrence in the text; keywords that do not occur are dropped.
//! - [`SketchTemplate::ContiguousSpans`]: every occurrence of every
//!   keyword selects its character span; the union is re-emitted with
//!   gaps collapsed to single spaces, no masks.
//! - [`SketchTemplate::MaskedSpans`] (default): same span selection, but
//!   omitted regions become explicit mask tokens. This is the form the
//!   generation model consumes: `<mask> span1 <mask> span2 <mask>`.
//!
//! # Example
//!
//! ```rust
//! use sketchaug::{SketchExtractor, SketchTemplate, MockKeywordExtractor};
//!
//! let extractor = SketchExtractor::new(MockKeywordExtractor::new());
//! let text = "Hurricane Fiona smashed through Puerto Rico on Monday";
//! let kws = vec!["Hurricane Fiona".to_string(), "Puerto Rico".to_string()];
//! let sketch = extractor.get_sketch_from_kws(text, &kws, SketchTemplate::MaskedSpans);
//! assert_eq!(sketch, "Hurricane Fiona <mask> Puerto Rico <mask>");
//! ```

use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A keyword phrase with its extractor-assigned importance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPhrase {
    /// The phrase text.
    pub phrase: String,
    /// Importance score; higher ranks first.
    pub score: f64,
}

impl ScoredPhrase {
    /// Create a scored phrase.
    #[must_use]
    pub fn new(phrase: impl Into<String>, score: f64) -> Self {
        Self {
            phrase: phrase.into(),
            score,
        }
    }
}

/// Parameters for keyword extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordParams {
    /// Maximum phrase length in words.
    pub max_ngram: usize,
    /// Number of keywords to return.
    pub top_k: usize,
    /// Optional seed phrases biasing the ranking toward similar spans
    /// (aspect-guided extraction).
    pub aspect_hints: Option<Vec<String>>,
}

impl Default for KeywordParams {
    fn default() -> Self {
        Self {
            max_ngram: 3,
            top_k: 10,
            aspect_hints: None,
        }
    }
}

/// External keyword/keyphrase extraction backend.
///
/// Implementations rank phrases however they like (statistical,
/// embedding-based); the sketch logic consumes only the ordered phrase
/// list.
pub trait KeywordExtractor {
    /// Extract up to `params.top_k` ranked phrases from `text`.
    fn extract_keywords(&self, text: &str, params: &KeywordParams) -> Result<Vec<ScoredPhrase>>;
}

impl<K: KeywordExtractor + ?Sized> KeywordExtractor for &K {
    fn extract_keywords(&self, text: &str, params: &KeywordParams) -> Result<Vec<ScoredPhrase>> {
        (**self).extract_keywords(text, params)
    }
}

/// A deterministic keyword extractor for tests and examples.
///
/// Returns fixed phrases when configured with [`with_phrases`], otherwise
/// ranks aspect hints first and fills the remainder with the text's words
/// in document order.
///
/// [`with_phrases`]: MockKeywordExtractor::with_phrases
#[derive(Debug, Clone, Default)]
pub struct MockKeywordExtractor {
    fixed: Option<Vec<ScoredPhrase>>,
}

impl MockKeywordExtractor {
    /// Create a mock that derives keywords from aspect hints and words.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return these phrases (truncated to `top_k`).
    #[must_use]
    pub fn with_phrases(phrases: Vec<ScoredPhrase>) -> Self {
        Self {
            fixed: Some(phrases),
        }
    }
}

impl KeywordExtractor for MockKeywordExtractor {
    fn extract_keywords(&self, text: &str, params: &KeywordParams) -> Result<Vec<ScoredPhrase>> {
        if let Some(fixed) = &self.fixed {
            return Ok(fixed.iter().take(params.top_k).cloned().collect());
        }
        let mut phrases: Vec<ScoredPhrase> = Vec::new();
        if let Some(hints) = &params.aspect_hints {
            for hint in hints {
                phrases.push(ScoredPhrase::new(hint.clone(), 1.0));
            }
        }
        for word in text.split_whitespace() {
            if phrases.len() >= params.top_k {
                break;
            }
            if phrases.iter().all(|p| p.phrase != word) {
                phrases.push(ScoredPhrase::new(word, 0.5));
            }
        }
        phrases.truncate(params.top_k);
        Ok(phrases)
    }
}

/// Sketch template policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SketchTemplate {
    /// Keywords joined in importance order.
    KeywordsByImportance,
    /// Keywords re-sorted by first occurrence in the text.
    KeywordsByPosition,
    /// Selected character spans re-emitted with gaps collapsed to spaces.
    ContiguousSpans,
    /// Selected spans with omitted regions rendered as mask tokens.
    #[default]
    MaskedSpans,
}

/// Builds sketches from text plus keyword lists.
#[derive(Debug, Clone)]
pub struct SketchExtractor<K> {
    backend: K,
    mask: String,
    sep: String,
}

impl<K: KeywordExtractor> SketchExtractor<K> {
    /// Create an extractor with the default `<mask>` token and single
    /// space separator.
    #[must_use]
    pub fn new(backend: K) -> Self {
        Self {
            backend,
            mask: "<mask>".to_string(),
            sep: " ".to_string(),
        }
    }

    /// Override the mask placeholder token.
    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = mask.into();
        self
    }

    /// Override the separator string around mask tokens.
    #[must_use]
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Ranked keyword phrases for a text (scores dropped).
    pub fn get_kws(&self, text: &str, params: &KeywordParams) -> Result<Vec<String>> {
        Ok(self
            .backend
            .extract_keywords(text, params)?
            .into_iter()
            .map(|p| p.phrase)
            .collect())
    }

    /// Build a sketch from an already-extracted keyword list.
    #[must_use]
    pub fn get_sketch_from_kws(
        &self,
        text: &str,
        keywords: &[String],
        template: SketchTemplate,
    ) -> String {
        match template {
            SketchTemplate::KeywordsByImportance => keywords.join(" "),
            SketchTemplate::KeywordsByPosition => self.keywords_by_position(text, keywords),
            SketchTemplate::ContiguousSpans => self.render_spans(text, keywords, false),
            SketchTemplate::MaskedSpans => self.render_spans(text, keywords, true),
        }
    }

    /// Extract keywords and build a sketch in one step.
    pub fn get_sketch(
        &self,
        text: &str,
        params: &KeywordParams,
        template: SketchTemplate,
    ) -> Result<String> {
        let keywords = self.get_kws(text, params)?;
        Ok(self.get_sketch_from_kws(text, &keywords, template))
    }

    /// Template 2: keywords sorted by first occurrence offset. Keywords
    /// absent from the text (extractors may normalize punctuation away)
    /// are dropped silently.
    fn keywords_by_position(&self, text: &str, keywords: &[String]) -> String {
        let mut with_offsets: Vec<(&str, usize)> = Vec::new();
        for keyword in keywords {
            match text.find(keyword.as_str()) {
                Some(offset) => with_offsets.push((keyword, offset)),
                None => log::debug!("keyword '{keyword}' not found in text, dropping"),
            }
        }
        with_offsets.sort_by_key(|&(_, offset)| offset);
        with_offsets
            .iter()
            .map(|&(kw, _)| kw)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Templates 3 and 4: select the union of character spans covered by
    /// any occurrence of any keyword, then re-emit.
    ///
    /// A gap whose omitted characters are all whitespace is bridged with
    /// the separator, so keywords that jointly cover every word of a
    /// region reconstruct it without masks. Gaps hiding real content
    /// become a mask token (template 4) or a single space (template 3).
    fn render_spans(&self, text: &str, keywords: &[String], masked: bool) -> String {
        let chars: Vec<char> = text.chars().collect();
        let selected = select_char_indices(text, keywords);

        let mut out = String::new();
        let mut prev: Option<usize> = None;
        let last = selected.iter().next_back().copied();
        for &id in &selected {
            match prev {
                None => {
                    if masked && id != 0 {
                        out.push_str(&self.mask);
                        out.push_str(&self.sep);
                    }
                }
                Some(p) if id - p > 1 => {
                    let gap_is_blank = chars[p + 1..id].iter().all(|c| c.is_whitespace());
                    if masked && !gap_is_blank {
                        out.push_str(&self.sep);
                        out.push_str(&self.mask);
                        out.push_str(&self.sep);
                    } else if masked {
                        out.push_str(&self.sep);
                    } else {
                        out.push(' ');
                    }
                }
                Some(_) => {}
            }
            out.push(chars[id]);
            prev = Some(id);
        }
        if masked {
            if let Some(last) = last {
                if last != chars.len() - 1 {
                    out.push_str(&self.sep);
                    out.push_str(&self.mask);
                }
            }
        }
        out
    }
}

/// Union of character indices covered by any occurrence of any keyword.
/// Keywords are matched literally (regex-escaped); a keyword with zero
/// matches is skipped with a diagnostic.
fn select_char_indices(text: &str, keywords: &[String]) -> BTreeSet<usize> {
    // Byte offset -> char index, for translating match spans.
    let mut byte_to_char = std::collections::HashMap::new();
    let mut char_count = 0;
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        byte_to_char.insert(byte_idx, char_idx);
        char_count = char_idx + 1;
    }

    let mut selected = BTreeSet::new();
    for keyword in keywords {
        if keyword.is_empty() {
            continue;
        }
        let re = match Regex::new(&regex::escape(keyword)) {
            Ok(re) => re,
            Err(e) => {
                log::warn!("keyword '{keyword}' is not matchable: {e}");
                continue;
            }
        };
        let mut matched = false;
        for m in re.find_iter(text) {
            matched = true;
            let start = byte_to_char[&m.start()];
            let end = byte_to_char.get(&m.end()).copied().unwrap_or(char_count);
            selected.extend(start..end);
        }
        if !matched {
            log::warn!("keyword '{keyword}' not found in text, skipping");
        }
    }
    selected
}
