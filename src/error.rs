//! Error types for dispatch operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("gRPC status error: {0}")]
    Status(#[from] tonic::Status),

    #[error("invalid worker address {0:?}")]
    InvalidAddress(String),

    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error("all workers failed to process the request")]
    AllWorkersFailed,
}
