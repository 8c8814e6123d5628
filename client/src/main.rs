mod prompt;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use matrix_dispatch_types::compute::dispatcher_client::DispatcherClient;
use matrix_dispatch_types::tls;
use tonic::transport::Endpoint;
use tracing_subscriber::EnvFilter;

/// Matrix operation client
#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Sends one matrix operation to the dispatcher")]
struct Args {
    /// Dispatcher address
    #[arg(short, long, default_value = "localhost:8000")]
    server: String,

    /// Connect over TLS
    #[arg(long)]
    tls: bool,

    /// PEM certificate trusted when --tls is set
    #[arg(long, default_value = tls::DEFAULT_CERT_PATH)]
    ca: PathBuf,

    /// Name expected in the dispatcher certificate
    #[arg(long, default_value = tls::DEFAULT_DOMAIN)]
    tls_domain: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    println!("Matrix Operation Client");
    println!("-----------------------");

    let request = {
        let stdin = io::stdin();
        prompt::collect_request(&mut stdin.lock(), &mut io::stdout())?
    };
    tracing::debug!(?request, "sending request");

    let scheme = if args.tls { "https" } else { "http" };
    let mut endpoint = Endpoint::from_shared(format!("{}://{}", scheme, args.server))?;
    if args.tls {
        endpoint = endpoint.tls_config(tls::client_tls_config(&args.ca, &args.tls_domain)?)?;
    }
    let mut client = DispatcherClient::new(endpoint.connect().await?);

    let outcome = client
        .handle_request(request)
        .await
        .map(tonic::Response::into_inner);
    if let Ok(response) = &outcome {
        tracing::debug!(?response, "received response");
    }
    prompt::report(outcome, &mut io::stdout())?;

    Ok(())
}
