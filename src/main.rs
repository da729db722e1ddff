use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use geniuslyrics::api::server::start_rocket_server;
use geniuslyrics::config::AppConfig;
use geniuslyrics::logging::initialize_logging;
use geniuslyrics::GeniusClient;

/// Lyrics API server backed by Genius
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// JSON configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config file)
    #[clap(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on (overrides config file and PORT)
    #[clap(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,

    /// Alias for --debug
    #[clap(short, long)]
    verbose: bool,
}

#[rocket::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = initialize_logging(config.logging.take(), cli.debug || cli.verbose) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if let Some(host) = cli.host {
        config.webserver.host = host;
    }
    if let Some(port) = cli.port {
        config.webserver.port = port;
    }

    info!(
        "Genius lyrics server {} (genius: {}, timeout {}s, view counting {})",
        env!("CARGO_PKG_VERSION"),
        config.genius.base_url,
        config.genius.timeout_secs,
        if config.genius.count_views { "on" } else { "off" }
    );

    let genius = Arc::new(GeniusClient::new(config.genius.clone()));

    match start_rocket_server(&config.webserver, genius).await {
        Ok(()) => {
            info!("Exiting application");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Webserver failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
