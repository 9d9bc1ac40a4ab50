//! Entity mention extraction from tagged sentences.
//!
//! Scans a token/tag sequence and collects contiguous entity spans. Start
//! versus continuation is decided purely by tag-index parity (see
//! [`TagVocabulary`]), so the scan never parses label strings.
//!
//! # Orphan continuations
//!
//! Generated or noisy data can carry an `I-T` tag with no matching open
//! mention. The extractor never fails on these: if a mention of type `T`
//! is already open it absorbs the token, otherwise the tag is promoted to
//! a fresh `B-T` start. Both behaviors are pinned by tests.

use crate::{Error, Result, TagVocabulary, TaggedSentence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A contiguous entity span: whitespace-joined surface form plus type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Surface form, tokens joined by single spaces.
    pub text: String,
    /// Entity type name (label with the BIO prefix stripped).
    pub entity_type: String,
}

impl Mention {
    /// Create a mention.
    #[must_use]
    pub fn new(text: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// Extracts mentions from tagged token sequences.
#[derive(Debug, Clone, Copy)]
pub struct MentionExtractor<'a> {
    vocab: &'a TagVocabulary,
}

impl<'a> MentionExtractor<'a> {
    /// Create an extractor over a tag vocabulary.
    #[must_use]
    pub fn new(vocab: &'a TagVocabulary) -> Self {
        Self { vocab }
    }

    /// Extract mentions in span-start order, both flat and grouped by
    /// entity type. Every type in the vocabulary appears as a key, empty
    /// or not.
    pub fn extract(
        &self,
        tokens: &[String],
        tags: &[usize],
    ) -> Result<(Vec<Mention>, BTreeMap<String, Vec<String>>)> {
        if tokens.len() != tags.len() {
            return Err(Error::malformed(format!(
                "{} tokens but {} tags",
                tokens.len(),
                tags.len()
            )));
        }

        // Open spans in start order; (type, token buffer).
        let mut spans: Vec<(String, Vec<String>)> = Vec::new();

        for (token, &tag) in tokens.iter().zip(tags) {
            if self.vocab.is_outside(tag) {
                continue;
            }
            let entity_type = self.vocab.type_of(tag).ok_or_else(|| {
                Error::malformed(format!("tag index {tag} out of range"))
            })?;

            if self.vocab.is_begin(tag) {
                spans.push((entity_type.to_string(), vec![token.clone()]));
            } else {
                // Continuation: absorb into the most recently opened span
                // of the same type, or promote to a fresh start.
                match spans.iter_mut().rev().find(|(t, _)| t == entity_type) {
                    Some((_, buffer)) => buffer.push(token.clone()),
                    None => spans.push((entity_type.to_string(), vec![token.clone()])),
                }
            }
        }

        let mut by_type: BTreeMap<String, Vec<String>> = self
            .vocab
            .entity_types()
            .into_iter()
            .map(|t| (t.to_string(), Vec::new()))
            .collect();
        let mut mentions = Vec::with_capacity(spans.len());
        for (entity_type, buffer) in spans {
            let text = buffer.join(" ");
            if let Some(list) = by_type.get_mut(&entity_type) {
                list.push(text.clone());
            }
            mentions.push(Mention::new(text, entity_type));
        }

        Ok((mentions, by_type))
    }

    /// Convenience wrapper over a [`TaggedSentence`].
    pub fn extract_sentence(
        &self,
        sentence: &TaggedSentence,
    ) -> Result<(Vec<Mention>, BTreeMap<String, Vec<String>>)> {
        self.extract(&sentence.tokens, &sentence.tags)
    }
}
