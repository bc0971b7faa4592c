use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;
use redacao_server::{run_server, AppConfig, AppState};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "redacao-server", about = "Essay correction and feed server")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gemini API key (overrides config file and environment)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'm', long)]
    model: Option<String>,

    /// HTTP server address
    #[arg(long)]
    http_addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starting redacao server");

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;

    // CLI overrides.
    if let Some(api_key) = args.api_key {
        config.gemini.api_key = Some(api_key);
    }
    if let Some(model) = args.model {
        config.gemini.model_name = Some(model);
    }
    if let Some(http_addr) = args.http_addr {
        config.http_addr = http_addr;
    }

    let addr = config.http_addr;
    let state = AppState::in_memory(config);

    run_server(state, addr).await
}
