use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("`{0}` not found, not a notebook")]
    MissingContent(PathBuf),
}
