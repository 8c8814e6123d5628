//! Shared types for the matrix dispatch system.
//!
//! `matrix-dispatch-types` holds everything the client, the dispatcher and the
//! workers agree on:
//!
//! - the generated gRPC bindings for `proto/compute.proto` ([`compute`]),
//! - the domain [`Matrix`] and [`Operation`] types used by the executor,
//! - TLS credential loading shared by every process ([`tls`]).
//!
//! # Example
//!
//! ```
//! use matrix_dispatch_types::{compute, Matrix, Operation};
//!
//! let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! let request = compute::ComputeRequest::new(Operation::Transpose, a, None);
//! assert_eq!(request.operation, "transpose");
//! ```

pub mod compute {
    tonic::include_proto!("compute");
}

mod error;
mod matrix;
pub mod tls;
mod wire;

pub use error::Error;
pub use matrix::{Matrix, Operation};
