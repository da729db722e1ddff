use std::sync::Arc;

use log::{debug, error, info};
use rocket::get;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;
use serde_json::Value;

use crate::data::LyricsDocument;
use crate::helpers::genius::GeniusClient;
use crate::helpers::lyrics::LyricsError;

/// Message for any failure that is not a validation or not-found error
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch lyrics";

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

type ErrorReply = Custom<Json<ErrorResponse>>;

/// Map a lookup error to its HTTP status and JSON body
pub fn error_reply(err: LyricsError) -> ErrorReply {
    match err {
        LyricsError::MissingQuery => Custom(
            Status::BadRequest,
            Json(ErrorResponse {
                error: err.to_string(),
                details: None,
            }),
        ),
        LyricsError::SongNotFound { .. } | LyricsError::LyricsUrlUnavailable { .. } => {
            let error = err.to_string();
            let details = err.details().cloned();
            Custom(Status::NotFound, Json(ErrorResponse { error, details }))
        }
        other => {
            error!("Lyrics fetch error: {}", other);
            Custom(
                Status::InternalServerError,
                Json(ErrorResponse {
                    error: FETCH_FAILED_MESSAGE.to_string(),
                    details: Some(Value::String(other.to_string())),
                }),
            )
        }
    }
}

/// Search Genius for `q` and return the lyrics of the first matching song
#[get("/lyrics?<q>")]
pub async fn get_lyrics(
    q: Option<String>,
    genius: &State<Arc<GeniusClient>>,
) -> Result<Json<LyricsDocument>, ErrorReply> {
    let query = match q {
        Some(query) if !query.is_empty() => query,
        _ => {
            debug!("Rejecting lyrics request without query");
            return Err(error_reply(LyricsError::MissingQuery));
        }
    };

    info!("Lyrics request for '{}'", query);

    // The HTTP client blocks, keep it off the async workers
    let client = Arc::clone(genius.inner());
    let lookup = tokio::task::spawn_blocking(move || client.fetch_lyrics(&query)).await;

    match lookup {
        Ok(Ok(document)) => Ok(Json(document)),
        Ok(Err(e)) => Err(error_reply(e)),
        Err(e) => {
            error!("Lyrics lookup task failed: {}", e);
            Err(Custom(
                Status::InternalServerError,
                Json(ErrorResponse {
                    error: FETCH_FAILED_MESSAGE.to_string(),
                    details: Some(Value::String(e.to_string())),
                }),
            ))
        }
    }
}
