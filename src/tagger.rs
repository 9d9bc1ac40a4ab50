//! Dictionary-based BIO re-tagging.
//!
//! Converts a generated sentence back into a token/tag sequence using the
//! mention dictionary mined from the seed corpus. Tokenization preserves
//! known multi-word mentions as atomic units via longest-match merging,
//! then each unit is labeled `B-T`/`I-T...` through the reverse index or
//! all-`O` when unknown.
//!
//! Tagging is best-effort by design: text that matches nothing degrades
//! to `O`, it never fails. The output token and tag sequences always have
//! equal length.

use crate::{tokenize, GlobalMentionIndex, TagVocabulary, TaggedSentence};
use std::collections::HashMap;

/// Word-level prefix trie over known mention word sequences.
#[derive(Debug, Default)]
struct MentionTrie {
    children: HashMap<String, MentionTrie>,
    terminal: bool,
}

impl MentionTrie {
    fn insert(&mut self, words: &[&str]) {
        let mut node = self;
        for &word in words {
            node = node.children.entry(word.to_string()).or_default();
        }
        node.terminal = true;
    }

    /// Length of the longest known mention starting at `words[0]`.
    fn longest_match(&self, words: &[String]) -> Option<usize> {
        let mut node = self;
        let mut best = None;
        for (i, word) in words.iter().enumerate() {
            match node.children.get(word) {
                Some(next) => {
                    node = next;
                    if node.terminal {
                        best = Some(i + 1);
                    }
                }
                None => break,
            }
        }
        best
    }
}

/// Tags arbitrary text against a [`GlobalMentionIndex`].
///
/// Borrows the index and vocabulary read-only; build both once per run,
/// then tag any number of sentences.
#[derive(Debug)]
pub struct DictionaryTagger<'a> {
    index: &'a GlobalMentionIndex,
    vocab: &'a TagVocabulary,
    trie: MentionTrie,
}

impl<'a> DictionaryTagger<'a> {
    /// Build a tagger over an immutable mention index.
    #[must_use]
    pub fn new(index: &'a GlobalMentionIndex, vocab: &'a TagVocabulary) -> Self {
        let mut trie = MentionTrie::default();
        for mention in index.all_mentions() {
            let words: Vec<&str> = mention.split(' ').collect();
            if !words.is_empty() {
                trie.insert(&words);
            }
        }
        Self { index, vocab, trie }
    }

    /// Tokenize a sentence, gluing adjacent words that form a known
    /// mention into one space-joined unit. Longest mention wins; ties
    /// cannot arise since matches share a start position.
    #[must_use]
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        let words = tokenize::words(sentence);
        let mut units = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            match self.trie.longest_match(&words[i..]) {
                Some(len) if len > 1 => {
                    units.push(words[i..i + len].join(" "));
                    i += len;
                }
                _ => {
                    units.push(words[i].clone());
                    i += 1;
                }
            }
        }
        units
    }

    /// Tag a sentence, returning parallel token and tag sequences.
    #[must_use]
    pub fn tag(&self, sentence: &str) -> TaggedSentence {
        let mut tokens = Vec::new();
        let mut tags = Vec::new();

        for unit in self.tokenize(sentence) {
            let entity_tags = self.index.type_of(&unit).and_then(|entity_type| {
                let begin = self.vocab.begin_index_of(entity_type);
                let inside = self.vocab.inside_index_of(entity_type);
                if begin.is_none() || inside.is_none() {
                    log::warn!("mention '{unit}' has type '{entity_type}' unknown to the vocabulary");
                }
                Some((begin?, inside?))
            });

            match entity_tags {
                Some((begin, inside)) => {
                    for (i, word) in tokenize::words(&unit).into_iter().enumerate() {
                        tags.push(if i == 0 { begin } else { inside });
                        tokens.push(word);
                    }
                }
                None => {
                    for word in tokenize::words(&unit) {
                        tags.push(0);
                        tokens.push(word);
                    }
                }
            }
        }

        debug_assert_eq!(tokens.len(), tags.len());
        TaggedSentence::new(tokens, tags)
    }
}
