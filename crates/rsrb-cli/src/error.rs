use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the runner before or instead of interpretation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize AST: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RunError>;
