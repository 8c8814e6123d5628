//! Dispatcher configuration.

use std::net::SocketAddr;
use std::time::Duration;

use tonic::transport::ClientTlsConfig;

use crate::connector::GrpcConnector;

/// Worker pool the dispatcher routes to.
pub const DEFAULT_WORKERS: [&str; 3] = ["localhost:9000", "localhost:9001", "localhost:9002"];

/// Upper bound on dialing a single worker.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Address the client-facing service listens on.
    pub listen_addr: SocketAddr,
    /// Worker addresses in registration order.
    pub workers: Vec<String>,
    pub connect_timeout: Duration,
    /// Set when workers are dialed over TLS.
    pub worker_tls: Option<ClientTlsConfig>,
}

impl DispatcherConfig {
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            workers: DEFAULT_WORKERS.iter().map(|w| w.to_string()).collect(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            worker_tls: None,
        }
    }

    pub fn with_workers<I, S>(mut self, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workers = workers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_worker_tls(mut self, tls: ClientTlsConfig) -> Self {
        self.worker_tls = Some(tls);
        self
    }

    /// Connector matching the configured transport.
    pub fn connector(&self) -> GrpcConnector {
        match &self.worker_tls {
            Some(tls) => GrpcConnector::with_tls(self.connect_timeout, tls.clone()),
            None => GrpcConnector::plain(self.connect_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::new("127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(!config.connector().is_tls());
    }

    #[test]
    fn test_overrides() {
        let config = DispatcherConfig::new("127.0.0.1:8000".parse().unwrap())
            .with_workers(["10.0.0.1:9000"])
            .with_connect_timeout(Duration::from_millis(250))
            .with_worker_tls(ClientTlsConfig::new());

        assert_eq!(config.workers, vec!["10.0.0.1:9000"]);
        let connector = config.connector();
        assert!(connector.is_tls());
        assert_eq!(connector.connect_timeout(), Duration::from_millis(250));
    }
}
