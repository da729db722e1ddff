use crate::api::{home, lyrics};
use crate::config::WebserverConfig;
use crate::constants::API_PREFIX;
use crate::helpers::genius::GeniusClient;

use log::info;
use rocket::{get, routes};
use rocket::serde::json::Json;
use rocket::config::Config;
use std::sync::Arc;

// Define the version response struct
#[derive(serde::Serialize)]
struct VersionResponse {
    version: String,
}

// API endpoint to get the version
#[get("/version")]
fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the Rocket instance with all routes mounted
pub fn build_rocket(webserver: &WebserverConfig, genius: Arc<GeniusClient>) -> rocket::Rocket<rocket::Build> {
    let config = Config::figment()
        .merge(("port", webserver.port))
        .merge(("address", webserver.host.clone()));

    let api_routes = routes![
        get_version,
        lyrics::get_lyrics,
    ];

    rocket::custom(config)
        .mount("/", routes![home::index])
        .mount(API_PREFIX, api_routes)
        .manage(genius)
}

// Start the Rocket server
pub async fn start_rocket_server(webserver: &WebserverConfig, genius: Arc<GeniusClient>) -> Result<(), rocket::Error> {
    info!("Starting webserver on {}:{}", webserver.host, webserver.port);

    let _rocket = build_rocket(webserver, genius).launch().await?;

    Ok(())
}
