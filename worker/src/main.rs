use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use matrix_dispatch_types::tls;
use matrix_worker::grpc;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

/// Matrix operation worker
#[derive(Parser, Debug)]
#[command(name = "worker")]
#[command(about = "Serves matrix operations for the dispatcher")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "9000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Serve over TLS
    #[arg(long)]
    tls: bool,

    /// PEM certificate presented when --tls is set
    #[arg(long, default_value = tls::DEFAULT_CERT_PATH)]
    cert: PathBuf,

    /// PEM private key for --cert
    #[arg(long, default_value = tls::DEFAULT_KEY_PATH)]
    key: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr: SocketAddr = format!("{}:{}", args.address, args.port).parse()?;

    let mut builder = Server::builder();
    if args.tls {
        builder = builder.tls_config(tls::server_tls_config(&args.cert, &args.key)?)?;
        tracing::info!("Worker listening on {} (TLS)", addr);
    } else {
        tracing::info!("Worker listening on {}", addr);
    }

    builder
        .add_service(grpc::create_server())
        .serve_with_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down worker...");
        })
        .await?;

    Ok(())
}
