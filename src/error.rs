//! Error types for sketchaug.

use thiserror::Error;

/// Result type for sketchaug operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sketchaug operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Tag vocabulary is not a valid BIO layout.
    #[error("Invalid tag vocabulary: {0}")]
    Vocab(String),

    /// Token and tag sequences disagree (length mismatch or out-of-range tag).
    #[error("Malformed sequence: {0}")]
    MalformedSequence(String),

    /// Dataset loading/parsing error.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Keyword extraction backend failed.
    #[error("Keyword extraction failed: {0}")]
    KeywordExtraction(String),

    /// Text generation backend failed.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a vocabulary error.
    pub fn vocab(msg: impl Into<String>) -> Self {
        Error::Vocab(msg.into())
    }

    /// Create a malformed sequence error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedSequence(msg.into())
    }

    /// Create a dataset error.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Error::Dataset(msg.into())
    }

    /// Create a keyword extraction error.
    pub fn keyword_extraction(msg: impl Into<String>) -> Self {
        Error::KeywordExtraction(msg.into())
    }

    /// Create a generation error.
    pub fn generation(msg: impl Into<String>) -> Self {
        Error::Generation(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
