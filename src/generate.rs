//! Text-infill generation collaborator.
//!
//! The generation model is opaque to this crate: a batched, synchronous,
//! order-preserving function from sketch strings to generated sentences.
//! Retry and backoff, if any, belong to the caller wrapping its backend,
//! not here.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Beam count for beam search.
    pub num_beams: usize,
    /// Whether to sample instead of greedy decoding.
    pub do_sample: bool,
    /// Maximum generated length in model tokens.
    pub max_length: usize,
    /// Backend batch size hint.
    pub batch_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            num_beams: 3,
            do_sample: true,
            max_length: 100,
            batch_size: 32,
        }
    }
}

/// External text-infill generation backend.
///
/// Contract: one output per input, same order. A response of any other
/// length is an error, and any backend failure aborts the run.
pub trait Generator {
    /// Generate one sentence per sketch in `batch`.
    fn generate(&self, batch: &[String], config: &SamplingConfig) -> Result<Vec<String>>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn generate(&self, batch: &[String], config: &SamplingConfig) -> Result<Vec<String>> {
        (**self).generate(batch, config)
    }
}

/// A scriptable generation backend for tests and examples.
///
/// Echoes its input by default; configured outputs are cycled to match
/// the batch length.
///
/// # Example
///
/// ```rust
/// use sketchaug::{Generator, MockGenerator, SamplingConfig};
///
/// let backend = MockGenerator::with_outputs(vec!["John visited Paris".to_string()]);
/// let out = backend
///     .generate(&["<mask> Paris <mask>".to_string()], &SamplingConfig::default())
///     .unwrap();
/// assert_eq!(out, vec!["John visited Paris"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    outputs: Vec<String>,
    fail: bool,
}

impl MockGenerator {
    /// Create a mock that echoes its input batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every batch with these outputs, cycled.
    #[must_use]
    pub fn with_outputs(outputs: Vec<String>) -> Self {
        Self {
            outputs,
            fail: false,
        }
    }

    /// Create a mock whose calls always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            outputs: Vec::new(),
            fail: true,
        }
    }
}

impl Generator for MockGenerator {
    fn generate(&self, batch: &[String], _config: &SamplingConfig) -> Result<Vec<String>> {
        if self.fail {
            return Err(Error::generation("mock backend failure"));
        }
        if self.outputs.is_empty() {
            return Ok(batch.to_vec());
        }
        Ok((0..batch.len())
            .map(|i| self.outputs[i % self.outputs.len()].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_by_default() {
        let batch = vec!["a".to_string(), "b".to_string()];
        let out = MockGenerator::new()
            .generate(&batch, &SamplingConfig::default())
            .unwrap();
        assert_eq!(out, batch);
    }

    #[test]
    fn outputs_cycle_to_batch_length() {
        let backend = MockGenerator::with_outputs(vec!["x".to_string(), "y".to_string()]);
        let batch = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let out = backend.generate(&batch, &SamplingConfig::default()).unwrap();
        assert_eq!(out, vec!["x", "y", "x"]);
    }

    #[test]
    fn failing_backend_errors() {
        let result = MockGenerator::failing().generate(&["s".to_string()], &SamplingConfig::default());
        assert!(matches!(result, Err(Error::Generation(_))));
    }

    #[test]
    fn sampling_defaults_match_reference_run() {
        let config = SamplingConfig::default();
        assert_eq!(config.num_beams, 3);
        assert!(config.do_sample);
        assert_eq!(config.max_length, 100);
        assert_eq!(config.batch_size, 32);
    }
}
