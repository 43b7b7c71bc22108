//! pipe2tcp - forwards a named pipe server to a remote TCP server

use clap::Parser;
use pipe2tcp::common::{logging, RelayConfig};
use pipe2tcp::relay;

#[derive(Parser)]
#[command(name = "pipe2tcp", about = "Forwards a named pipe server to a remote TCP server")]
#[command(version, long_about = None)]
struct Cli {
    /// The remote TCP server (host:port)
    #[arg(long)]
    remote: Option<String>,

    /// The pipe server name
    #[arg(long)]
    pipe: Option<String>,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    let config = RelayConfig::resolve(cli.remote, cli.pipe);

    tracing::info!(
        "Relaying pipe '{}' to {}:{}",
        config.pipe_name,
        config.host,
        config.port
    );

    if let Err(e) = relay::run(config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
