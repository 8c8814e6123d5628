use matrix_dispatch_types::compute::worker_server::{Worker, WorkerServer};
use matrix_dispatch_types::compute::{ComputeRequest, ComputeResponse};
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

use crate::executor;

#[derive(Debug, Clone, Default)]
pub struct WorkerServiceImpl;

impl WorkerServiceImpl {
    pub fn new() -> Self {
        Self
    }
}

#[tonic::async_trait]
impl Worker for WorkerServiceImpl {
    async fn compute(
        &self,
        request: Request<ComputeRequest>,
    ) -> Result<Response<ComputeResponse>, Status> {
        let req = request.into_inner();
        let operation = req.operation.clone();
        debug!(%operation, "received compute request");

        let response = executor::compute(req);
        if response.is_error() {
            warn!(%operation, error = %response.error, "rejected compute request");
        } else {
            info!(%operation, "completed compute request");
        }

        Ok(Response::new(response))
    }
}

pub fn create_server() -> WorkerServer<WorkerServiceImpl> {
    WorkerServer::new(WorkerServiceImpl::new())
}
