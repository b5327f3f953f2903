use std::path::PathBuf;
use thiserror::Error;

/// Main error type for knowledge clustering
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// File system errors, tagged with the offending path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML configuration errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal errors
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Language identifier with no tokenizer/stemmer behind it
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// No candidate file was found
    #[error("{0}")]
    NoFile(String),

    /// More candidate files than expected were found
    #[error("{0}")]
    TooManyFiles(String),

    /// Attempt to merge a term into the bag of a term that belongs to no bag
    #[error("Cannot define '{term}' as a synonym: '{anchor}' is not a knowledge")]
    UnknownAnchor { term: String, anchor: String },

    /// A term would end up in two bags
    #[error("Knowledge '{0}' is already defined")]
    DuplicateTerm(String),

    /// Target file changed on disk while we were working on it
    #[error("File {path} has been modified during the run; new content left in {temp_path}")]
    ConcurrentModification { path: PathBuf, temp_path: PathBuf },

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl KnowledgeError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KnowledgeError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<String> for KnowledgeError {
    fn from(s: String) -> Self {
        KnowledgeError::Other(s)
    }
}

impl From<&str> for KnowledgeError {
    fn from(s: &str) -> Self {
        KnowledgeError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, KnowledgeError>;
