//! TLS credential loading.
//!
//! Servers present a PEM certificate/key pair. Clients trust a single PEM
//! certificate (or CA) because peers are configured by address, not
//! discovered.

use std::path::Path;

use tonic::transport::{Certificate, ClientTlsConfig, Identity, ServerTlsConfig};

use crate::Error;

pub const DEFAULT_CERT_PATH: &str = "certs/server.crt";
pub const DEFAULT_KEY_PATH: &str = "certs/server.key";
pub const DEFAULT_DOMAIN: &str = "localhost";

/// Loads the server identity used when listening with TLS.
pub fn server_tls_config(
    cert_path: impl AsRef<Path>,
    key_path: impl AsRef<Path>,
) -> Result<ServerTlsConfig, Error> {
    let cert = read_pem(cert_path.as_ref())?;
    let key = read_pem(key_path.as_ref())?;
    Ok(ServerTlsConfig::new().identity(Identity::from_pem(cert, key)))
}

/// Builds a client config that trusts `ca_path` and expects `domain` in the
/// peer certificate.
pub fn client_tls_config(ca_path: impl AsRef<Path>, domain: &str) -> Result<ClientTlsConfig, Error> {
    let ca = read_pem(ca_path.as_ref())?;
    Ok(ClientTlsConfig::new()
        .ca_certificate(Certificate::from_pem(ca))
        .domain_name(domain))
}

fn read_pem(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| Error::Credentials {
        path: path.to_path_buf(),
        source,
    })
}
