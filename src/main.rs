// src/main.rs
//
// CoinGecko-backed crypto lookup API. Resolves a free-text query to a
// coin, fetches live market stats plus a price history window, and
// serves the merged result over HTTP.

use clap::Parser;
use crypto_dashboard::config::{default_config_template, Config};
use crypto_dashboard::provider::CoinGeckoClient;
use crypto_dashboard::server::ApiServer;
use crypto_dashboard::service::CryptoService;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "crypto-dashboard")]
#[command(about = "Crypto market data aggregation API backed by CoinGecko")]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(long, short)]
    config: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Upstream base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Generate a default configuration file
    #[arg(long)]
    generate_config: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", default_config_template());
        return;
    }

    let config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                eprintln!("Use --generate-config to create a template.");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let port = args.port.unwrap_or(config.server.port);
    let base_url = args.base_url.unwrap_or(config.upstream.base_url);

    let client = CoinGeckoClient::with_timeout(
        base_url,
        Duration::from_secs(config.upstream.timeout_secs),
    );
    let service = CryptoService::new(client);

    if let Err(e) = ApiServer::new(service, port).run().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
