use std::process::ExitCode;

use clap::Parser;
use log::debug;

use geniuslyrics::api::lyrics::error_reply;
use geniuslyrics::constants::{DEFAULT_TIMEOUT_SECS, GENIUS_BASE_URL};
use geniuslyrics::{GeniusClient, GeniusConfig};

/// Look up lyrics on Genius from the command line
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Free-text song query, e.g. "Dynasty MIIA"
    #[clap(required = true)]
    query: Vec<String>,

    /// Genius base URL
    #[clap(long, default_value = GENIUS_BASE_URL)]
    base_url: String,

    /// Timeout for each request in seconds
    #[clap(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Do not notify Genius about the page view
    #[clap(long)]
    no_count_view: bool,

    /// Print only the lyrics text instead of the JSON document
    #[clap(short, long)]
    lyrics_only: bool,
}

fn main() -> ExitCode {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn")
    );

    let cli = Cli::parse();
    let query = cli.query.join(" ");

    let config = GeniusConfig {
        base_url: cli.base_url.trim_end_matches('/').to_string(),
        timeout_secs: cli.timeout,
        count_views: !cli.no_count_view,
        ..Default::default()
    };
    debug!("Using {:?}", config);

    let client = GeniusClient::new(config);

    match client.fetch_lyrics(&query) {
        Ok(document) => {
            if cli.lyrics_only {
                println!("{}", document.lyrics);
            } else {
                match serde_json::to_string_pretty(&document) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Same body the API would answer with
            let reply = error_reply(e);
            match serde_json::to_string_pretty(&reply.1.into_inner()) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Failed to serialize error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}
