use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuickFolderError>;

/// Failures while turning a folder list into a tree
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("folder list contains no folders")]
    EmptyInput,
    #[error("failed to read folder list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum QuickFolderError {
    #[error("Loading config failed: {0}")]
    Load(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid style config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Command(String),
}
