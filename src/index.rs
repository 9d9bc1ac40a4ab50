//! Global mention index built from a seed corpus.
//!
//! Aggregates every mention observed by [`MentionExtractor`] across the
//! corpus into a per-type set of surface forms, expanded with case
//! variants so the dictionary tagger recognizes generated text that does
//! not reproduce the seed casing exactly. Immutable after construction.

use crate::{MentionExtractor, TagVocabulary, TaggedSentence};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Per-type mention sets plus a derived reverse map.
///
/// The reverse map (surface form → entity type) is built by iterating
/// types in sorted order with last-write-wins, so a surface form
/// registered under several types deterministically resolves to the
/// alphabetically greatest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalMentionIndex {
    by_type: BTreeMap<String, HashSet<String>>,
    reverse: HashMap<String, String>,
}

impl GlobalMentionIndex {
    /// Build the index from a seed corpus.
    ///
    /// Malformed sentences are skipped with a warning; they never abort
    /// the build.
    #[must_use]
    pub fn build(corpus: &[TaggedSentence], vocab: &TagVocabulary) -> Self {
        let extractor = MentionExtractor::new(vocab);
        let mut by_type: BTreeMap<String, HashSet<String>> = vocab
            .entity_types()
            .into_iter()
            .map(|t| (t.to_string(), HashSet::new()))
            .collect();

        for (i, sentence) in corpus.iter().enumerate() {
            let (_, mention_map) = match extractor.extract_sentence(sentence) {
                Ok(extracted) => extracted,
                Err(e) => {
                    log::warn!("skipping seed sentence {i}: {e}");
                    continue;
                }
            };
            for (entity_type, mentions) in mention_map {
                let set = by_type.entry(entity_type).or_default();
                for mention in mentions {
                    set.insert(mention.to_lowercase());
                    set.insert(mention.to_uppercase());
                    set.insert(title_case(&mention));
                    set.insert(capitalize(&mention));
                    set.insert(mention);
                }
            }
        }

        let mut reverse = HashMap::new();
        for (entity_type, mentions) in &by_type {
            for mention in mentions {
                reverse.insert(mention.clone(), entity_type.clone());
            }
        }

        Self { by_type, reverse }
    }

    /// Mention surface forms registered for a type.
    #[must_use]
    pub fn mentions_of(&self, entity_type: &str) -> Option<&HashSet<String>> {
        self.by_type.get(entity_type)
    }

    /// Entity type a surface form resolves to, if known.
    #[must_use]
    pub fn type_of(&self, mention: &str) -> Option<&str> {
        self.reverse.get(mention).map(String::as_str)
    }

    /// Whether a surface form is a known mention.
    #[must_use]
    pub fn contains(&self, mention: &str) -> bool {
        self.reverse.contains_key(mention)
    }

    /// Entity types in sorted order.
    #[must_use]
    pub fn entity_types(&self) -> Vec<&str> {
        self.by_type.keys().map(String::as_str).collect()
    }

    /// All known surface forms, across types.
    pub fn all_mentions(&self) -> impl Iterator<Item = &str> {
        self.reverse.keys().map(String::as_str)
    }

    /// Whether the index holds no mentions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Number of distinct surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }
}

/// Word-level title casing: first letter of each whitespace-separated
/// word uppercased, the rest lowercased.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First character uppercased, everything after it lowercased.
fn capitalize(s: impl AsRef<str>) -> String {
    let s = s.as_ref();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(tokens: &[&str], tags: &[usize]) -> TaggedSentence {
        TaggedSentence::new(
            tokens.iter().map(|s| s.to_string()).collect(),
            tags.to_vec(),
        )
    }

    #[test]
    fn case_variants_are_registered() {
        let vocab = TagVocabulary::conll2003();
        let corpus = vec![sentence(&["Paris", "calling"], &[5, 0])];
        let index = GlobalMentionIndex::build(&corpus, &vocab);

        let locs = index.mentions_of("LOC").unwrap();
        for form in ["Paris", "paris", "PARIS"] {
            assert!(locs.contains(form), "missing variant {form}");
            assert_eq!(index.type_of(form), Some("LOC"));
        }
    }

    #[test]
    fn multi_word_variants() {
        let vocab = TagVocabulary::conll2003();
        let corpus = vec![sentence(&["new", "york"], &[5, 6])];
        let index = GlobalMentionIndex::build(&corpus, &vocab);

        let locs = index.mentions_of("LOC").unwrap();
        assert!(locs.contains("new york"));
        assert!(locs.contains("NEW YORK"));
        assert!(locs.contains("New York")); // title
        assert!(locs.contains("New york")); // capitalized
    }

    #[test]
    fn build_is_idempotent() {
        let vocab = TagVocabulary::conll2003();
        let corpus = vec![
            sentence(&["United", "Nations", "in", "Geneva"], &[3, 4, 0, 5]),
            sentence(&["Smith"], &[1]),
        ];
        let a = GlobalMentionIndex::build(&corpus, &vocab);
        let b = GlobalMentionIndex::build(&corpus, &vocab);
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_sentences_are_skipped() {
        let vocab = TagVocabulary::conll2003();
        let corpus = vec![
            sentence(&["broken"], &[1, 2]), // length mismatch
            sentence(&["Paris"], &[5]),
        ];
        let index = GlobalMentionIndex::build(&corpus, &vocab);
        assert_eq!(index.type_of("Paris"), Some("LOC"));
    }

    #[test]
    fn collision_resolves_to_sorted_last_type() {
        let vocab = TagVocabulary::conll2003();
        // "Jordan" observed both as LOC and PER; sorted type order is
        // LOC < MISC < ORG < PER, so PER wins in the reverse map.
        let corpus = vec![
            sentence(&["Jordan"], &[5]),
            sentence(&["Jordan"], &[1]),
        ];
        let index = GlobalMentionIndex::build(&corpus, &vocab);
        assert_eq!(index.type_of("Jordan"), Some("PER"));
        // Both forward sets still hold the mention.
        assert!(index.mentions_of("LOC").unwrap().contains("Jordan"));
        assert!(index.mentions_of("PER").unwrap().contains("Jordan"));
    }

    #[test]
    fn empty_corpus_is_empty_index() {
        let vocab = TagVocabulary::conll2003();
        let index = GlobalMentionIndex::build(&[], &vocab);
        assert!(index.is_empty());
        assert_eq!(index.entity_types(), vec!["LOC", "MISC", "ORG", "PER"]);
    }

    #[test]
    fn title_and_capitalize_helpers() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case("IBM corp"), "Ibm Corp");
        assert_eq!(capitalize("nEW YORK"), "New york");
        assert_eq!(capitalize(""), "");
    }
}
