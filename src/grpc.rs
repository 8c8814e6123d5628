use std::sync::Arc;

use matrix_dispatch_types::compute::dispatcher_server::{
    Dispatcher as DispatcherRpc, DispatcherServer,
};
use matrix_dispatch_types::compute::{ComputeRequest, ComputeResponse};
use tonic::{Request, Response, Status};

use crate::connector::Connector;
use crate::dispatch::Dispatcher;

pub struct DispatcherServiceImpl<C> {
    dispatcher: Arc<Dispatcher<C>>,
}

impl<C> DispatcherServiceImpl<C> {
    pub fn new(dispatcher: Arc<Dispatcher<C>>) -> Self {
        Self { dispatcher }
    }
}

#[tonic::async_trait]
impl<C: Connector> DispatcherRpc for DispatcherServiceImpl<C> {
    async fn handle_request(
        &self,
        request: Request<ComputeRequest>,
    ) -> Result<Response<ComputeResponse>, Status> {
        let req = request.into_inner();
        match self.dispatcher.handle_request(req).await {
            Ok(response) => Ok(Response::new(response)),
            Err(e) => Err(Status::unavailable(e.to_string())),
        }
    }
}

pub fn create_server<C: Connector>(
    dispatcher: Arc<Dispatcher<C>>,
) -> DispatcherServer<DispatcherServiceImpl<C>> {
    DispatcherServer::new(DispatcherServiceImpl::new(dispatcher))
}
