//! Error types shared by all processes.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Credentials {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    #[error("matrix rows must have equal length")]
    RaggedMatrix,
}
