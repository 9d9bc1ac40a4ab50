//! BIO tag vocabulary.
//!
//! A [`TagVocabulary`] is an explicit, immutable value passed to every
//! component that needs to map between label strings and integer tag
//! indices. There is no process-wide label registry.
//!
//! The layout follows the CoNLL convention: `O` at index 0, then a
//! `B-T`/`I-T` pair per entity type. Begin tags sit at odd indices and
//! inside tags at even indices, so start/continuation and entity type can
//! both be derived from the integer tag alone — no string parsing on the
//! hot path.
//!
//! # Example
//!
//! ```rust
//! use sketchaug::TagVocabulary;
//!
//! let vocab = TagVocabulary::conll2003();
//! assert_eq!(vocab.index_of("B-PER"), Some(1));
//! assert!(vocab.is_begin(1));
//! assert!(vocab.is_inside(2));
//! assert_eq!(vocab.type_of(2), Some("PER"));
//! assert_eq!(vocab.type_of(0), None); // O carries no type
//! ```

use crate::{Error, Result};
use std::collections::HashMap;

/// Immutable BIO label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    labels: Vec<String>,
    indices: HashMap<String, usize>,
}

impl TagVocabulary {
    /// Build a vocabulary from an ordered label list, validating the BIO
    /// layout: `O` first, then matched `B-T`/`I-T` pairs.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let labels: Vec<String> = labels.iter().map(|s| s.as_ref().to_string()).collect();

        if labels.first().map(String::as_str) != Some("O") {
            return Err(Error::vocab("first label must be 'O'"));
        }
        if labels.len() % 2 == 0 {
            return Err(Error::vocab(format!(
                "expected 'O' plus B/I pairs, got {} labels",
                labels.len()
            )));
        }
        for pair in labels[1..].chunks(2) {
            let (begin, inside) = (&pair[0], &pair[1]);
            let b_type = begin
                .strip_prefix("B-")
                .ok_or_else(|| Error::vocab(format!("'{begin}' is not a B- tag")))?;
            let i_type = inside
                .strip_prefix("I-")
                .ok_or_else(|| Error::vocab(format!("'{inside}' is not an I- tag")))?;
            if b_type != i_type {
                return Err(Error::vocab(format!(
                    "unpaired tags: '{begin}' followed by '{inside}'"
                )));
            }
        }

        let mut indices = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if indices.insert(label.clone(), i).is_some() {
                return Err(Error::vocab(format!("duplicate label '{label}'")));
            }
        }

        Ok(Self { labels, indices })
    }

    /// The CoNLL-2003 tag set (PER, ORG, LOC, MISC).
    #[must_use]
    pub fn conll2003() -> Self {
        Self::new(&[
            "O", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC", "B-MISC", "I-MISC",
        ])
        .unwrap_or_else(|_| unreachable!("conll2003 layout is valid"))
    }

    /// Index of a label string, if present.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Label string at an index, if in range.
    #[must_use]
    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Entity type name for a tag index (prefix stripped). `None` for `O`
    /// and out-of-range indices.
    #[must_use]
    pub fn type_of(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.labels.get(index).map(|l| &l[2..])
    }

    /// Whether the index is the `O` tag.
    #[must_use]
    pub fn is_outside(&self, index: usize) -> bool {
        index == 0
    }

    /// Whether the index is a `B-` tag (odd parity).
    #[must_use]
    pub fn is_begin(&self, index: usize) -> bool {
        index % 2 == 1 && index < self.labels.len()
    }

    /// Whether the index is an `I-` tag (even parity, not `O`).
    #[must_use]
    pub fn is_inside(&self, index: usize) -> bool {
        index != 0 && index % 2 == 0 && index < self.labels.len()
    }

    /// Index of `B-{type}`, if the type is known.
    #[must_use]
    pub fn begin_index_of(&self, entity_type: &str) -> Option<usize> {
        self.index_of(&format!("B-{entity_type}"))
    }

    /// Index of `I-{type}`, if the type is known.
    #[must_use]
    pub fn inside_index_of(&self, entity_type: &str) -> Option<usize> {
        self.index_of(&format!("I-{entity_type}"))
    }

    /// Entity type names in order of first appearance.
    #[must_use]
    pub fn entity_types(&self) -> Vec<&str> {
        self.labels[1..].chunks(2).map(|pair| &pair[0][2..]).collect()
    }

    /// Number of labels (including `O`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary holds only `O`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.len() <= 1
    }

    /// All labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conll2003_layout() {
        let vocab = TagVocabulary::conll2003();
        assert_eq!(vocab.len(), 9);
        assert_eq!(vocab.label_of(0), Some("O"));
        assert_eq!(vocab.index_of("I-MISC"), Some(8));
        assert_eq!(vocab.entity_types(), vec!["PER", "ORG", "LOC", "MISC"]);
    }

    #[test]
    fn parity_rules() {
        let vocab = TagVocabulary::conll2003();
        for i in 0..vocab.len() {
            if i == 0 {
                assert!(vocab.is_outside(i));
                assert!(!vocab.is_begin(i));
                assert!(!vocab.is_inside(i));
            } else if i % 2 == 1 {
                assert!(vocab.is_begin(i));
                assert!(!vocab.is_inside(i));
            } else {
                assert!(vocab.is_inside(i));
                assert!(!vocab.is_begin(i));
            }
        }
    }

    #[test]
    fn type_derivation_matches_labels() {
        let vocab = TagVocabulary::conll2003();
        assert_eq!(vocab.type_of(1), Some("PER"));
        assert_eq!(vocab.type_of(2), Some("PER"));
        assert_eq!(vocab.type_of(7), Some("MISC"));
        assert_eq!(vocab.type_of(0), None);
        assert_eq!(vocab.type_of(99), None);
    }

    #[test]
    fn begin_inside_lookup() {
        let vocab = TagVocabulary::conll2003();
        assert_eq!(vocab.begin_index_of("LOC"), Some(5));
        assert_eq!(vocab.inside_index_of("LOC"), Some(6));
        assert_eq!(vocab.begin_index_of("GENE"), None);
    }

    #[test]
    fn rejects_missing_o() {
        assert!(TagVocabulary::new(&["B-PER", "I-PER"]).is_err());
    }

    #[test]
    fn rejects_unpaired_tags() {
        assert!(TagVocabulary::new(&["O", "B-PER", "I-ORG"]).is_err());
        assert!(TagVocabulary::new(&["O", "B-PER"]).is_err());
        assert!(TagVocabulary::new(&["O", "I-PER", "B-PER"]).is_err());
    }

    #[test]
    fn rejects_duplicates() {
        assert!(TagVocabulary::new(&["O", "B-PER", "I-PER", "B-PER", "I-PER"]).is_err());
    }
}
