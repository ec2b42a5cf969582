//! Error types for project indexing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Cannot read project root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project root {path} is not a directory")]
    RootNotDirectory { path: PathBuf },

    #[error("Invalid classifier pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;
