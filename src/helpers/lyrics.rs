/// Lyrics extraction from Genius song pages
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use thiserror::Error;

use crate::constants::VERSE_MARKER;
use crate::helpers::http_client::HttpClientError;

/// Result type for lyrics operations
pub type LyricsResult<T> = Result<T, LyricsError>;

/// Error type for lyrics operations
#[derive(Debug, Error)]
pub enum LyricsError {
    /// No or empty search query
    #[error("Please provide a search query with the \"q\" parameter")]
    MissingQuery,

    /// No section or hit of a song type in the search response
    #[error("No song found matching your query")]
    SongNotFound { details: Value },

    /// A song was selected but it has no lyrics page
    #[error("Couldn't find lyrics URL for this song")]
    LyricsUrlUnavailable { details: Value },

    /// Network error or non-success status from Genius
    #[error(transparent)]
    Upstream(#[from] HttpClientError),

    /// Search response that does not have the expected shape
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    /// The song page could not be processed
    #[error("Failed to extract lyrics: {0}")]
    Extraction(String),
}

impl LyricsError {
    /// Raw provider response attached to not-found errors
    pub fn details(&self) -> Option<&Value> {
        match self {
            LyricsError::SongNotFound { details } | LyricsError::LyricsUrlUnavailable { details } => Some(details),
            _ => None,
        }
    }
}

/// Lyrics blocks are the direct children of #lyrics-root flagged by Genius
pub const LYRICS_CONTAINER_SELECTOR: &str = r#"#lyrics-root > [data-lyrics-container="true"]"#;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("line break pattern is valid"));

/// Convert the markup of one lyrics container into plain text.
///
/// Two passes: line-break tags become newlines on the raw markup, then the
/// result is parsed again to drop the remaining tags and decode entities.
pub fn container_text(markup: &str) -> String {
    let with_newlines = LINE_BREAK.replace_all(markup, "\n");
    let fragment = Html::parse_fragment(&with_newlines);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Drop everything before the first verse marker, if there is one
pub fn trim_to_first_verse(text: &str) -> &str {
    match text.find(VERSE_MARKER) {
        Some(position) => &text[position..],
        None => text,
    }
}

/// Extract the lyrics text from a Genius song page.
///
/// Verses are joined by a blank line. A page without lyrics containers
/// yields an empty string, not an error.
pub fn extract_lyrics_from_html(html: &str) -> LyricsResult<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LYRICS_CONTAINER_SELECTOR).map_err(|e| {
        LyricsError::Extraction(format!("Invalid CSS selector '{}': {:?}", LYRICS_CONTAINER_SELECTOR, e))
    })?;

    let mut lyrics_text = String::new();
    let mut container_count = 0;

    for container in document.select(&selector) {
        container_count += 1;
        let verse = container_text(&container.html());
        if !verse.is_empty() {
            lyrics_text.push_str(&verse);
            lyrics_text.push_str("\n\n");
        }
    }

    debug!("Found {} lyrics containers ({} bytes of text)", container_count, lyrics_text.len());

    Ok(trim_to_first_verse(&lyrics_text).trim().to_string())
}
