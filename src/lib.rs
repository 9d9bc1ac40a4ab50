//! # sketchaug
//!
//! Sketch-based data augmentation for NER training sets.
//!
//! Given a small labeled seed corpus, sketchaug mines entity mentions and
//! keyword sketches from the seed sentences, feeds masked sketches to a
//! generative infill model, and re-tags the generated sentences with a
//! dictionary tagger built from the mentions observed in the seed data.
//! The output is an augmented token/tag dataset for training a downstream
//! NER model.
//!
//! ## Pipeline
//!
//! ```text
//! seed corpus → mentions → global index → sketches → generated text → re-tagged examples
//! ```
//!
//! - [`MentionExtractor`]: contiguous entity spans from a tagged sentence.
//! - [`GlobalMentionIndex`]: per-type mention sets with case variants,
//!   built once per run, immutable afterwards.
//! - [`SketchExtractor`]: masked sketch strings under four template
//!   policies.
//! - [`DictionaryTagger`]: multi-word-expression tokenization plus BIO
//!   tag assignment from the mention dictionary.
//! - [`AugmentationPipeline`]: the orchestration around them.
//!
//! ## External collaborators
//!
//! Keyword ranking and text generation stay behind traits: implement
//! [`KeywordExtractor`] over your keyphrase backend and [`Generator`]
//! over your infill model. [`MockKeywordExtractor`] and [`MockGenerator`]
//! are deterministic stand-ins for tests.
//!
//! ## Quick start
//!
//! ```rust
//! use sketchaug::{
//!     AugmentationPipeline, MockGenerator, MockKeywordExtractor, PipelineConfig,
//!     TagVocabulary, TaggedSentence,
//! };
//!
//! let vocab = TagVocabulary::conll2003();
//! let seed = vec![TaggedSentence::new(
//!     vec!["Arsenal".into(), "won".into(), "in".into(), "London".into()],
//!     vec![3, 0, 0, 5],
//! )];
//!
//! let pipeline = AugmentationPipeline::new(PipelineConfig { concat: None, ..Default::default() });
//! let augmented = pipeline
//!     .run(&seed, &vocab, &MockKeywordExtractor::new(), &MockGenerator::new())
//!     .unwrap();
//!
//! for record in &augmented.records {
//!     assert_eq!(record.tokens.len(), record.tags.len());
//! }
//! ```
//!
//! ## Design
//!
//! - **Explicit vocabulary**: the BIO label table is a value
//!   ([`TagVocabulary`]) passed to every component, never a process-wide
//!   registry.
//! - **Best-effort tagging**: generated text that matches nothing
//!   degrades to `O`; a single bad example never aborts a run.
//! - **Synchronous core**: the only blocking call is the batched
//!   generation request; the index is read-only after construction, so
//!   sampling passes may be parallelized by the caller.

#![warn(missing_docs)]

mod corpus;
mod error;
mod generate;
mod index;
mod mention;
mod pipeline;
mod sketch;
mod tagger;
pub mod tokenize;
mod vocab;

pub use corpus::{
    concat_sequences, load_conll, AugmentedDataset, ConcatMode, TaggedSentence,
};
pub use error::{Error, Result};
pub use generate::{Generator, MockGenerator, SamplingConfig};
pub use index::GlobalMentionIndex;
pub use mention::{Mention, MentionExtractor};
pub use pipeline::{AugmentationPipeline, ConcatConfig, PipelineConfig};
pub use sketch::{
    KeywordExtractor, KeywordParams, MockKeywordExtractor, ScoredPhrase, SketchExtractor,
    SketchTemplate,
};
pub use tagger::DictionaryTagger;
pub use vocab::TagVocabulary;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use sketchaug::prelude::*;
    //!
    //! let vocab = TagVocabulary::conll2003();
    //! assert_eq!(vocab.entity_types(), vec!["PER", "ORG", "LOC", "MISC"]);
    //! ```
    pub use crate::error::{Error, Result};
    pub use crate::{
        AugmentationPipeline, AugmentedDataset, DictionaryTagger, Generator, GlobalMentionIndex,
        KeywordExtractor, KeywordParams, Mention, MentionExtractor, PipelineConfig,
        SamplingConfig, SketchExtractor, SketchTemplate, TagVocabulary, TaggedSentence,
    };
}
