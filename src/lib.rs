//! Least-loaded dispatch of matrix operations to a fixed worker pool.
//!
//! `matrix-dispatch` accepts `compute.Dispatcher/HandleRequest` calls and
//! forwards each one to a worker from a static pool. The worker with the
//! fewest in-flight attempts is chosen; if it cannot be reached, or the call
//! fails in transit, the next least loaded untried worker is used, until
//! every worker has been tried once.
//!
//! # Components
//!
//! - [`WorkerRegistry`]: the only shared mutable state, one atomic load
//!   counter per worker
//! - [`Dispatcher`]: the per-request selection and failover loop
//! - [`Connector`]: how a worker is dialed (plain or TLS gRPC, or a test
//!   double)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use matrix_dispatch::{grpc, Dispatcher, DispatcherConfig};
//! use tonic::transport::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DispatcherConfig::new("127.0.0.1:8000".parse()?);
//!     let dispatcher = Arc::new(Dispatcher::from_config(&config));
//!
//!     Server::builder()
//!         .add_service(grpc::create_server(dispatcher))
//!         .serve(config.listen_addr)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connector;
pub mod dispatch;
mod error;
pub mod grpc;
pub mod registry;

pub use config::DispatcherConfig;
pub use connector::{Connector, GrpcConnector, WorkerConnection};
pub use dispatch::Dispatcher;
pub use error::Error;
pub use registry::{JobGuard, WorkerRecord, WorkerRegistry};
