//! Augmentation pipeline orchestration.
//!
//! Wires the pieces end to end: seed corpus → (optional concatenation
//! windowing) → global mention index → sketches → external generation →
//! dictionary re-tagging → augmented dataset.
//!
//! Per-example problems (malformed seeds, keyword extraction hiccups)
//! are logged and skipped; only a generation backend failure aborts a
//! run.
//!
//! # Example
//!
//! ```rust
//! use sketchaug::{
//!     AugmentationPipeline, MockGenerator, MockKeywordExtractor, PipelineConfig,
//!     TagVocabulary, TaggedSentence,
//! };
//!
//! let vocab = TagVocabulary::conll2003();
//! let seed = vec![TaggedSentence::new(
//!     vec!["Paris".into(), "is".into(), "calling".into()],
//!     vec![5, 0, 0],
//! )];
//!
//! let config = PipelineConfig { concat: None, ..Default::default() };
//! let pipeline = AugmentationPipeline::new(config);
//! let augmented = pipeline
//!     .run(&seed, &vocab, &MockKeywordExtractor::new(), &MockGenerator::new())
//!     .unwrap();
//! assert_eq!(augmented.len(), 1);
//! ```

use crate::{
    concat_sequences, AugmentedDataset, ConcatMode, Error, GlobalMentionIndex, KeywordExtractor,
    KeywordParams, MentionExtractor, Result, SamplingConfig, SketchExtractor, SketchTemplate,
    TagVocabulary, TaggedSentence,
};
use crate::{DictionaryTagger, Generator};
use serde::{Deserialize, Serialize};

/// Seed-sentence concatenation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcatConfig {
    /// Sentences per composite example.
    pub window: usize,
    /// Sliding window or disjoint chunks.
    pub mode: ConcatMode,
}

impl Default for ConcatConfig {
    fn default() -> Self {
        Self {
            window: 3,
            mode: ConcatMode::Sliding,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sketch template; masked spans is what infill models expect.
    pub template: SketchTemplate,
    /// Maximum keyword phrase length in words.
    pub max_ngram: usize,
    /// Lower bound on keywords per example; the effective `top_k` is
    /// `max(tokens / 4, top_k_floor)`.
    pub top_k_floor: usize,
    /// Number of independent sampling passes over the sketch batch.
    pub n_aug: usize,
    /// Optional seed concatenation; `None` uses seeds as-is.
    pub concat: Option<ConcatConfig>,
    /// Sampling parameters forwarded to the generation backend.
    pub sampling: SamplingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            template: SketchTemplate::MaskedSpans,
            max_ngram: 3,
            top_k_floor: 5,
            n_aug: 1,
            concat: Some(ConcatConfig::default()),
            sampling: SamplingConfig::default(),
        }
    }
}

/// Orchestrates one augmentation run.
#[derive(Debug, Clone, Default)]
pub struct AugmentationPipeline {
    config: PipelineConfig,
}

impl AugmentationPipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run augmentation over a seed corpus.
    ///
    /// Returns `n_aug` generated, re-tagged examples per usable seed
    /// example. Fails only on a generation backend error.
    pub fn run<K: KeywordExtractor, G: Generator>(
        &self,
        seed: &[TaggedSentence],
        vocab: &TagVocabulary,
        keywords: &K,
        generator: &G,
    ) -> Result<AugmentedDataset> {
        let working: Vec<TaggedSentence> = match self.config.concat {
            Some(concat) => concat_sequences(seed, concat.window, concat.mode),
            None => seed.to_vec(),
        };
        log::debug!(
            "augmenting {} seed examples ({} after windowing)",
            seed.len(),
            working.len()
        );

        let index = GlobalMentionIndex::build(&working, vocab);
        let tagger = DictionaryTagger::new(&index, vocab);
        let mention_extractor = MentionExtractor::new(vocab);
        let sketch_extractor = SketchExtractor::new(keywords);

        let mut sketches = Vec::with_capacity(working.len());
        for (i, example) in working.iter().enumerate() {
            if let Err(e) = example.validate(vocab) {
                log::warn!("skipping seed example {i}: {e}");
                continue;
            }
            let (mentions, _) = match mention_extractor.extract_sentence(example) {
                Ok(extracted) => extracted,
                Err(e) => {
                    log::warn!("skipping seed example {i}: {e}");
                    continue;
                }
            };
            let text = example.text();
            let params = KeywordParams {
                max_ngram: self.config.max_ngram,
                top_k: (example.len() / 4).max(self.config.top_k_floor),
                aspect_hints: Some(mentions.into_iter().map(|m| m.text).collect()),
            };
            match sketch_extractor.get_sketch(&text, &params, self.config.template) {
                Ok(sketch) => sketches.push(sketch),
                Err(e) => log::warn!("skipping seed example {i}: {e}"),
            }
        }

        let mut dataset = AugmentedDataset::default();
        for pass in 0..self.config.n_aug {
            let generated = generator.generate(&sketches, &self.config.sampling)?;
            if generated.len() != sketches.len() {
                return Err(Error::generation(format!(
                    "backend returned {} outputs for {} sketches",
                    generated.len(),
                    sketches.len()
                )));
            }
            log::debug!("pass {}: generated {} sentences", pass + 1, generated.len());
            for sentence in &generated {
                dataset.records.push(tagger.tag(sentence));
            }
        }

        Ok(dataset)
    }
}
