//! Property-based tests for core invariants.
//!
//! These verify properties that must hold for ALL inputs, not just
//! curated examples: the tagger's length invariant, index construction
//! determinism, and windowing arithmetic.

use proptest::prelude::*;
use sketchaug::{
    concat_sequences, ConcatMode, DictionaryTagger, GlobalMentionIndex, TagVocabulary,
    TaggedSentence,
};

fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Paris".to_string()),
        Just("Arsenal".to_string()),
        Just("John".to_string()),
        Just("Smith".to_string()),
        Just("the".to_string()),
        Just("match".to_string()),
        Just("won".to_string()),
        "[a-zA-Z]{1,8}",
    ]
}

fn sentence_strategy() -> impl Strategy<Value = TaggedSentence> {
    prop::collection::vec((word_strategy(), 0..9usize), 0..12)
        .prop_map(|pairs| {
            let (tokens, tags) = pairs.into_iter().unzip();
            TaggedSentence::new(tokens, tags)
        })
}

proptest! {
    #[test]
    fn tagger_output_lengths_always_match(
        corpus in prop::collection::vec(sentence_strategy(), 0..8),
        text in "[a-zA-Z ,.!?()'-]{0,80}",
    ) {
        let vocab = TagVocabulary::conll2003();
        let index = GlobalMentionIndex::build(&corpus, &vocab);
        let tagger = DictionaryTagger::new(&index, &vocab);

        let tagged = tagger.tag(&text);
        prop_assert_eq!(tagged.tokens.len(), tagged.tags.len());
        // Every emitted tag is in vocabulary range.
        prop_assert!(tagged.tags.iter().all(|&t| t < vocab.len()));
    }

    #[test]
    fn index_construction_is_idempotent(
        corpus in prop::collection::vec(sentence_strategy(), 0..8),
    ) {
        let vocab = TagVocabulary::conll2003();
        let a = GlobalMentionIndex::build(&corpus, &vocab);
        let b = GlobalMentionIndex::build(&corpus, &vocab);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn windowing_counts_match_formulas(
        len in 0..20usize,
        window in 1..5usize,
    ) {
        let corpus: Vec<_> = (0..len)
            .map(|i| TaggedSentence::new(vec![format!("w{i}")], vec![0]))
            .collect();

        let sliding = concat_sequences(&corpus, window, ConcatMode::Sliding);
        prop_assert_eq!(sliding.len(), len.saturating_sub(window));

        let disjoint = concat_sequences(&corpus, window, ConcatMode::Disjoint);
        prop_assert_eq!(disjoint.len(), len / window);
    }

    #[test]
    fn composites_preserve_token_tag_pairing(
        corpus in prop::collection::vec(sentence_strategy(), 0..10),
        window in 1..4usize,
    ) {
        for composite in concat_sequences(&corpus, window, ConcatMode::Sliding) {
            prop_assert_eq!(composite.tokens.len(), composite.tags.len());
        }
    }
}
