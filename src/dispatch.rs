//! Request dispatch with least-loaded selection and failover.

use std::collections::HashSet;

use matrix_dispatch_types::compute::{ComputeRequest, ComputeResponse};
use tracing::{debug, info, warn};

use crate::config::DispatcherConfig;
use crate::connector::{Connector, GrpcConnector, WorkerConnection};
use crate::registry::WorkerRegistry;
use crate::Error;

/// Routes each request to the least loaded worker, failing over to the next
/// untried worker when a connection or call fails.
///
/// # Failover
///
/// A request makes at most one attempt per registered worker. An attempt
/// fails when the worker cannot be dialed within the connect timeout or the
/// Compute call itself fails. A response that carries a computational error
/// (e.g. a dimension mismatch) is a successful dispatch: it is returned as-is
/// and never retried.
///
/// If every worker has been tried without success the request fails with
/// [`Error::AllWorkersFailed`].
pub struct Dispatcher<C> {
    registry: WorkerRegistry,
    connector: C,
}

impl Dispatcher<GrpcConnector> {
    /// Builds a gRPC dispatcher for the configured worker pool.
    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new(
            WorkerRegistry::new(config.workers.iter().cloned()),
            config.connector(),
        )
    }
}

impl<C: Connector> Dispatcher<C> {
    pub fn new(registry: WorkerRegistry, connector: C) -> Self {
        Self {
            registry,
            connector,
        }
    }

    pub fn registry(&self) -> &WorkerRegistry {
        &self.registry
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Dispatches `request` and returns the first worker response.
    pub async fn handle_request(&self, request: ComputeRequest) -> Result<ComputeResponse, Error> {
        debug!(operation = %request.operation, "received request");

        let max_attempts = self.registry.len();
        let mut tried: HashSet<String> = HashSet::with_capacity(max_attempts);
        let mut attempts = 0;

        while attempts < max_attempts {
            let Some(job) = self.registry.select_and_reserve(&tried) else {
                warn!("no untried worker left");
                break;
            };
            let worker = job.worker();
            tried.insert(worker.address().to_string());
            info!(worker = %worker.address(), load = worker.active_jobs(), "selected worker");

            let mut connection = match self.connector.connect(worker.address()).await {
                Ok(connection) => connection,
                Err(e) => {
                    warn!(worker = %worker.address(), error = %e, "failed to connect to worker");
                    attempts += 1;
                    continue;
                }
            };

            match connection.compute(request.clone()).await {
                Ok(response) => {
                    drop(connection);
                    drop(job);
                    info!(
                        worker = %worker.address(),
                        error = %response.error,
                        "received response from worker"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!(worker = %worker.address(), error = %e, "compute call failed");
                    attempts += 1;
                }
            }
        }

        warn!(attempts, "all workers failed to process the request");
        Err(Error::AllWorkersFailed)
    }
}
