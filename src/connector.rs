//! Connection establishment to workers.
//!
//! The dispatch protocol only needs "dial a worker, then run one Compute call
//! on the connection". [`Connector`] captures that, so the protocol does not
//! care whether connections are plaintext or TLS, or whether there is a
//! network at all.

use std::time::Duration;

use async_trait::async_trait;
use matrix_dispatch_types::compute::worker_client::WorkerClient;
use matrix_dispatch_types::compute::{ComputeRequest, ComputeResponse};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::Error;

/// Dials workers by address.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Connection: WorkerConnection;

    /// Opens a connection to `address`, bounded by the connector's timeout.
    async fn connect(&self, address: &str) -> Result<Self::Connection, Error>;
}

/// An open connection to one worker. Dropping it closes the connection.
#[async_trait]
pub trait WorkerConnection: Send {
    async fn compute(&mut self, request: ComputeRequest) -> Result<ComputeResponse, Error>;
}

/// gRPC connector, plaintext or TLS depending on how it was built.
#[derive(Debug, Clone)]
pub struct GrpcConnector {
    connect_timeout: Duration,
    tls: Option<ClientTlsConfig>,
}

impl GrpcConnector {
    pub fn plain(connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            tls: None,
        }
    }

    pub fn with_tls(connect_timeout: Duration, tls: ClientTlsConfig) -> Self {
        Self {
            connect_timeout,
            tls: Some(tls),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    fn endpoint(&self, address: &str) -> Result<Endpoint, Error> {
        let scheme = if self.is_tls() { "https" } else { "http" };
        let mut endpoint = Endpoint::from_shared(format!("{}://{}", scheme, address))
            .map_err(|_| Error::InvalidAddress(address.to_string()))?
            .connect_timeout(self.connect_timeout);
        if let Some(tls) = &self.tls {
            endpoint = endpoint.tls_config(tls.clone())?;
        }
        Ok(endpoint)
    }
}

#[async_trait]
impl Connector for GrpcConnector {
    type Connection = GrpcConnection;

    async fn connect(&self, address: &str) -> Result<GrpcConnection, Error> {
        let endpoint = self.endpoint(address)?;
        // Covers the TLS handshake as well as the TCP connect.
        let channel = tokio::time::timeout(self.connect_timeout, endpoint.connect())
            .await
            .map_err(|_| Error::ConnectTimeout(address.to_string()))??;
        Ok(GrpcConnection {
            client: WorkerClient::new(channel),
        })
    }
}

pub struct GrpcConnection {
    client: WorkerClient<Channel>,
}

#[async_trait]
impl WorkerConnection for GrpcConnection {
    async fn compute(&mut self, request: ComputeRequest) -> Result<ComputeResponse, Error> {
        let response = self.client.compute(request).await?;
        Ok(response.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refused_connection_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let connector = GrpcConnector::plain(Duration::from_secs(1));
        let result = connector.connect(&addr.to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let connector = GrpcConnector::plain(Duration::from_secs(1));
        let err = connector.connect("not an address").await.err().unwrap();
        assert!(matches!(err, Error::InvalidAddress(ref a) if a == "not an address"));
    }

    #[tokio::test]
    async fn test_silent_peer_times_out() {
        // Accepts TCP through the backlog but never answers the TLS handshake.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let timeout = Duration::from_millis(300);
        let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let tls = ClientTlsConfig::new()
            .ca_certificate(tonic::transport::Certificate::from_pem(cert.cert.pem()))
            .domain_name("localhost");
        let connector = GrpcConnector::with_tls(timeout, tls);

        let started = std::time::Instant::now();
        let err = connector.connect(&addr.to_string()).await.err().unwrap();
        let elapsed = started.elapsed();

        assert!(matches!(err, Error::ConnectTimeout(ref a) if *a == addr.to_string()));
        assert!(elapsed >= timeout);
        assert!(elapsed < Duration::from_secs(3));
        drop(listener);
    }

    #[test]
    fn test_tls_flag() {
        let plain = GrpcConnector::plain(Duration::from_secs(3));
        assert!(!plain.is_tls());
        assert_eq!(plain.connect_timeout(), Duration::from_secs(3));

        let tls = GrpcConnector::with_tls(Duration::from_secs(3), ClientTlsConfig::new());
        assert!(tls.is_tls());
    }
}
