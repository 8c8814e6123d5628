//! Validation errors produced by the executor.
//!
//! The `Display` text of each variant is what travels back to the client in
//! `ComputeResponse.error`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    #[error("matrices dimensions do not match for addition")]
    AdditionMismatch,

    #[error("matrices dimensions do not match for multiplication")]
    MultiplicationMismatch,

    #[error("unsupported operation")]
    UnsupportedOperation,

    #[error("matrix rows must have equal length")]
    RaggedMatrix,
}
