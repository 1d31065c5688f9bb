use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CppGraphError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load grammar: {0}")]
    Language(String),

    #[error("parser produced no tree for {0}")]
    Parse(String),

    #[error("invalid {category} query: {message}")]
    Query {
        category: &'static str,
        message: String,
    },

    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to write export to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CppGraphError>;
