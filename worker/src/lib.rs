//! Stateless matrix worker.
//!
//! `matrix-worker` exposes the operation executor over the `compute.Worker`
//! gRPC service. Workers keep no state between requests; validation problems
//! (dimension mismatches, unknown operations) are returned inside the
//! response rather than as gRPC errors, so the dispatcher only ever sees
//! call-level failures for real transport problems.

mod error;
pub mod executor;
pub mod grpc;

pub use error::ComputeError;
