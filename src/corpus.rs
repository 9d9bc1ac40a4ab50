//! Tagged sentence records, sequence windowing, and dataset IO.
//!
//! Supports the CoNLL column format (token + BIO label per line, blank
//! line between sentences) for seed corpora, and JSONL for the augmented
//! output. JSONL is used because the records carry variable-length
//! list-valued fields, which a flat delimited format cannot round-trip.

use crate::{Error, Result, TagVocabulary};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A sentence as parallel token and tag-index sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSentence {
    /// Word tokens in sentence order.
    pub tokens: Vec<String>,
    /// Tag indices into a [`TagVocabulary`], one per token.
    pub tags: Vec<usize>,
}

impl TaggedSentence {
    /// Create a sentence from parallel sequences.
    #[must_use]
    pub fn new(tokens: Vec<String>, tags: Vec<usize>) -> Self {
        Self { tokens, tags }
    }

    /// Check the token/tag length invariant and that every tag index is
    /// in range for the vocabulary.
    pub fn validate(&self, vocab: &TagVocabulary) -> Result<()> {
        if self.tokens.len() != self.tags.len() {
            return Err(Error::malformed(format!(
                "{} tokens but {} tags",
                self.tokens.len(),
                self.tags.len()
            )));
        }
        if let Some(&tag) = self.tags.iter().find(|&&t| t >= vocab.len()) {
            return Err(Error::malformed(format!(
                "tag index {} out of range for {} labels",
                tag,
                vocab.len()
            )));
        }
        Ok(())
    }

    /// The sentence as space-joined text.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// How consecutive sentences are grouped into composite examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcatMode {
    /// Sliding window with stride 1; a corpus of length `L` yields
    /// `max(L - window, 0)` composites.
    #[default]
    Sliding,
    /// Disjoint chunks; yields `L / window` composites, dropping the tail.
    Disjoint,
}

/// Concatenate groups of consecutive sentences into longer composite
/// examples. Longer inputs give the sketch more context and raise the
/// mention density per example.
///
/// A `window` of 0 yields no composites.
#[must_use]
pub fn concat_sequences(
    sentences: &[TaggedSentence],
    window: usize,
    mode: ConcatMode,
) -> Vec<TaggedSentence> {
    if window == 0 {
        return Vec::new();
    }
    let len = sentences.len();
    let join = |group: &[TaggedSentence]| {
        let tokens = group.iter().flat_map(|s| s.tokens.iter().cloned()).collect();
        let tags = group.iter().flat_map(|s| s.tags.iter().copied()).collect();
        TaggedSentence::new(tokens, tags)
    };
    match mode {
        ConcatMode::Sliding => (0..len.saturating_sub(window))
            .map(|i| join(&sentences[i..i + window]))
            .collect(),
        ConcatMode::Disjoint => (0..len / window)
            .map(|i| join(&sentences[i * window..(i + 1) * window]))
            .collect(),
    }
}

/// Load a CoNLL-style column file: one `token label` pair per line (extra
/// middle columns are ignored), blank lines between sentences,
/// `-DOCSTART-` rows skipped. Labels are mapped through the vocabulary;
/// an unknown label is a dataset error.
pub fn load_conll<P: AsRef<Path>>(path: P, vocab: &TagVocabulary) -> Result<Vec<TaggedSentence>> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut sentences = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut tags: Vec<usize> = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            if !tokens.is_empty() {
                sentences.push(TaggedSentence::new(
                    std::mem::take(&mut tokens),
                    std::mem::take(&mut tags),
                ));
            }
            continue;
        }
        let mut cols = line.split_whitespace();
        let token = cols.next().unwrap_or_default();
        if token == "-DOCSTART-" {
            continue;
        }
        let label = cols.last().ok_or_else(|| {
            Error::dataset(format!("line {}: missing label column", line_num + 1))
        })?;
        let tag = vocab.index_of(label).ok_or_else(|| {
            Error::dataset(format!("line {}: unknown label '{label}'", line_num + 1))
        })?;
        tokens.push(token.to_string());
        tags.push(tag);
    }
    if !tokens.is_empty() {
        sentences.push(TaggedSentence::new(tokens, tags));
    }

    Ok(sentences)
}

/// The augmented token/tag dataset produced by one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentedDataset {
    /// Generated, re-tagged examples.
    pub records: Vec<TaggedSentence>,
}

impl AugmentedDataset {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Conventional output file name, keyed by dataset name, seed size,
    /// and augmentation multiplier.
    #[must_use]
    pub fn output_file_name(dataset: &str, seed_size: usize, n_aug: usize) -> String {
        format!("{dataset}-{seed_size}-sketch-naug-{n_aug}.jsonl")
    }

    /// Write records as JSONL, one record per line.
    pub fn write_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = std::fs::File::create(path.as_ref())?;
        for record in &self.records {
            let line = serde_json::to_string(record).map_err(|e| Error::parse(e.to_string()))?;
            writeln!(file, "{line}")?;
        }
        Ok(())
    }

    /// Read records back from a JSONL file.
    pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: TaggedSentence = serde_json::from_str(&line).map_err(|e| {
                Error::parse(format!("line {}: {e}", line_num + 1))
            })?;
            records.push(record);
        }
        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(n: usize) -> TaggedSentence {
        TaggedSentence::new(vec![format!("w{n}")], vec![0])
    }

    #[test]
    fn validate_checks_lengths_and_range() {
        let vocab = TagVocabulary::conll2003();
        let ok = TaggedSentence::new(vec!["John".into()], vec![1]);
        assert!(ok.validate(&vocab).is_ok());

        let short = TaggedSentence::new(vec!["John".into(), "Smith".into()], vec![1]);
        assert!(short.validate(&vocab).is_err());

        let out_of_range = TaggedSentence::new(vec!["John".into()], vec![42]);
        assert!(out_of_range.validate(&vocab).is_err());
    }

    #[test]
    fn sliding_window_counts() {
        let corpus: Vec<_> = (0..10).map(sent).collect();
        assert_eq!(concat_sequences(&corpus, 3, ConcatMode::Sliding).len(), 7);
        assert_eq!(concat_sequences(&corpus[..3], 3, ConcatMode::Sliding).len(), 0);
        assert_eq!(concat_sequences(&corpus[..2], 3, ConcatMode::Sliding).len(), 0);
    }

    #[test]
    fn disjoint_chunk_counts() {
        let corpus: Vec<_> = (0..10).map(sent).collect();
        assert_eq!(concat_sequences(&corpus, 3, ConcatMode::Disjoint).len(), 3);
        assert_eq!(concat_sequences(&corpus[..2], 3, ConcatMode::Disjoint).len(), 0);
    }

    #[test]
    fn windowing_preserves_order_and_lengths() {
        let corpus: Vec<_> = (0..5).map(sent).collect();
        let composites = concat_sequences(&corpus, 2, ConcatMode::Sliding);
        assert_eq!(composites[0].tokens, vec!["w0", "w1"]);
        assert_eq!(composites[2].tokens, vec!["w2", "w3"]);
        for c in &composites {
            assert_eq!(c.tokens.len(), c.tags.len());
        }
    }

    #[test]
    fn zero_window_is_empty() {
        let corpus: Vec<_> = (0..4).map(sent).collect();
        assert!(concat_sequences(&corpus, 0, ConcatMode::Sliding).is_empty());
        assert!(concat_sequences(&corpus, 0, ConcatMode::Disjoint).is_empty());
    }

    #[test]
    fn conll_loader_parses_columns() {
        use std::io::Write;
        let vocab = TagVocabulary::conll2003();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-DOCSTART- -X- -X- O").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "EU NNP B-NP B-ORG").unwrap();
        writeln!(file, "rejects VBZ B-VP O").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Peter NNP B-NP B-PER").unwrap();
        writeln!(file, "Blackburn NNP I-NP I-PER").unwrap();
        file.flush().unwrap();

        let sentences = load_conll(file.path(), &vocab).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].tokens, vec!["EU", "rejects"]);
        assert_eq!(sentences[0].tags, vec![3, 0]);
        assert_eq!(sentences[1].tags, vec![1, 2]);
    }

    #[test]
    fn conll_loader_rejects_unknown_label() {
        use std::io::Write;
        let vocab = TagVocabulary::conll2003();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gene B-GENE").unwrap();
        file.flush().unwrap();
        assert!(load_conll(file.path(), &vocab).is_err());
    }

    #[test]
    fn jsonl_roundtrip() {
        let dataset = AugmentedDataset {
            records: vec![
                TaggedSentence::new(vec!["John".into(), "Smith".into()], vec![1, 2]),
                TaggedSentence::new(vec!["ok".into()], vec![0]),
            ],
        };
        let file = tempfile::NamedTempFile::new().unwrap();
        dataset.write_jsonl(file.path()).unwrap();
        let back = AugmentedDataset::read_jsonl(file.path()).unwrap();
        assert_eq!(back, dataset);
    }

    #[test]
    fn output_file_name_key() {
        assert_eq!(
            AugmentedDataset::output_file_name("conll2003", 50, 4),
            "conll2003-50-sketch-naug-4.jsonl"
        );
    }
}
