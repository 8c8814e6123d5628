use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use matrix_dispatch::{grpc, Dispatcher, DispatcherConfig};
use matrix_dispatch_types::tls;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

/// Matrix operation dispatcher
#[derive(Parser, Debug)]
#[command(name = "dispatcher")]
#[command(about = "Routes matrix operations to the least loaded worker")]
struct Args {
    /// Port to listen on for client requests
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Use TLS for clients and workers
    #[arg(long)]
    tls: bool,

    /// PEM certificate presented to clients when --tls is set
    #[arg(long, default_value = tls::DEFAULT_CERT_PATH)]
    cert: PathBuf,

    /// PEM private key for --cert
    #[arg(long, default_value = tls::DEFAULT_KEY_PATH)]
    key: PathBuf,

    /// PEM certificate trusted when dialing workers
    #[arg(long, default_value = tls::DEFAULT_CERT_PATH)]
    ca: PathBuf,

    /// Name expected in worker certificates
    #[arg(long, default_value = tls::DEFAULT_DOMAIN)]
    tls_domain: String,

    /// Worker connect timeout in milliseconds
    #[arg(long, default_value = "3000")]
    connect_timeout_ms: u64,

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
    let mut config = DispatcherConfig::new(addr)
        .with_connect_timeout(Duration::from_millis(args.connect_timeout_ms));

    let mut builder = Server::builder();
    if args.tls {
        config = config.with_worker_tls(tls::client_tls_config(&args.ca, &args.tls_domain)?);
        builder = builder.tls_config(tls::server_tls_config(&args.cert, &args.key)?)?;
    }

    tracing::info!("Starting dispatcher");
    tracing::info!("  Workers: {:?}", config.workers);
    tracing::info!("  Connect timeout: {:?}", config.connect_timeout);
    tracing::info!("  TLS: {}", args.tls);

    let dispatcher = Arc::new(Dispatcher::from_config(&config));

    tracing::info!("Listening on {}", config.listen_addr);
    builder
        .add_service(grpc::create_server(dispatcher))
        .serve_with_shutdown(config.listen_addr, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down dispatcher...");
        })
        .await?;

    Ok(())
}
