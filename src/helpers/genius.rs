//! Genius search, view counting and lyrics page retrieval
//!
//! A lookup runs three outbound calls in order: the multi search, an optional
//! fire-and-forget view count notification and the song page fetch. All of
//! them go through a [`HttpClient`] so they can be scripted in tests.

use std::thread;

use log::{debug, error, info, warn};
use serde_json::{json, Value};

use crate::config::get_service_config;
use crate::constants::{
    BROWSER_USER_AGENT, COUNT_VIEW_USER_AGENT, DEFAULT_TIMEOUT_SECS, GENIUS_BASE_URL, SEARCH_PER_PAGE,
};
use crate::data::{LyricsDocument, SearchResponse, SongResult};
use crate::helpers::http_client::{get_json, new_http_client, HttpClient, HttpClientError};
use crate::helpers::lyrics::{extract_lyrics_from_html, LyricsError, LyricsResult};

/// Genius connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeniusConfig {
    /// Base URL for the search and view count API, without trailing slash
    pub base_url: String,
    /// Timeout for each outbound request
    pub timeout_secs: u64,
    /// Whether to notify Genius about each page view
    pub count_views: bool,
    /// User agent used for search requests
    pub user_agent: String,
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            base_url: GENIUS_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            count_views: true,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl GeniusConfig {
    /// Read the "genius" service section, falling back to defaults for missing keys
    pub fn from_json(config: &Value) -> Self {
        let mut genius = GeniusConfig::default();

        let Some(section) = get_service_config(config, "genius") else {
            return genius;
        };

        if let Some(base_url) = section.get("base_url").and_then(|v| v.as_str()) {
            genius.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = section.get("timeout_secs").and_then(|v| v.as_u64()) {
            if timeout > 0 {
                genius.timeout_secs = timeout;
            } else {
                warn!("Ignoring genius.timeout_secs of 0, using {} seconds", genius.timeout_secs);
            }
        }
        if let Some(count_views) = section.get("count_views").and_then(|v| v.as_bool()) {
            genius.count_views = count_views;
        }
        if let Some(user_agent) = section.get("user_agent").and_then(|v| v.as_str()) {
            if !user_agent.is_empty() {
                genius.user_agent = user_agent.to_string();
            }
        }

        genius
    }
}

/// The song picked from a search, together with its lyrics page
#[derive(Debug, Clone)]
pub struct ResolvedSong {
    pub song: SongResult,
    pub page_url: String,
}

/// Client for the Genius website
#[derive(Debug, Clone)]
pub struct GeniusClient {
    config: GeniusConfig,
    http: Box<dyn HttpClient>,
}

impl GeniusClient {
    /// Create a client that talks to Genius over ureq
    pub fn new(config: GeniusConfig) -> Self {
        let http = new_http_client(config.timeout_secs);
        Self { config, http }
    }

    /// Create a client with a custom HTTP implementation
    pub fn with_http_client(config: GeniusConfig, http: Box<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/api/search/multi?per_page={}&q={}",
            self.config.base_url,
            SEARCH_PER_PAGE,
            urlencoding::encode(query)
        )
    }

    pub fn count_view_url(&self, song_id: &str) -> String {
        format!("{}/api/songs/{}/count_view", self.config.base_url, song_id)
    }

    /// Search Genius and pick the first song hit.
    pub fn resolve(&self, query: &str) -> LyricsResult<ResolvedSong> {
        let url = self.search_url(query);
        debug!("Searching Genius for '{}'", query);

        let headers = [
            ("accept", "application/json, text/plain, */*"),
            ("user-agent", self.config.user_agent.as_str()),
        ];
        let raw = get_json(self.http.as_ref(), &url, &headers)?;

        let search: SearchResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            error!("Unexpected search response layout: {}", e);
            LyricsError::MalformedResponse(e.to_string())
        })?;

        let song = match search.first_song() {
            Some(song) => song,
            None => {
                info!("No song found for '{}'", query);
                return Err(LyricsError::SongNotFound { details: raw });
            }
        };

        let page_url = match song.page_url() {
            Some(page_url) => page_url.to_string(),
            None => {
                info!("Song '{}' has no lyrics URL", song);
                return Err(LyricsError::LyricsUrlUnavailable { details: raw });
            }
        };

        debug!("Resolved '{}' to {} ({})", query, song, page_url);
        Ok(ResolvedSong { song, page_url })
    }

    /// Tell Genius the song page was viewed, without waiting for the result.
    ///
    /// Only songs with an API path are counted. Failures are logged and dropped.
    pub fn notify_view(&self, song: &SongResult, page_url: &str) {
        if !self.config.count_views {
            return;
        }
        let Some(song_id) = song.song_id() else {
            return;
        };

        let url = self.count_view_url(song_id);
        let referer = page_url.to_string();
        let http = self.http.clone();

        let spawned = thread::Builder::new()
            .name("genius-count-view".to_string())
            .spawn(move || {
                if let Err(e) = send_view_count(http.as_ref(), &url, &referer) {
                    warn!("View count update failed: {}", e);
                }
            });

        if let Err(e) = spawned {
            warn!("Could not start view count notifier: {}", e);
        }
    }

    /// Fetch a song page and extract its lyrics
    pub fn extract(&self, page_url: &str) -> LyricsResult<String> {
        debug!("Fetching lyrics page {}", page_url);
        let html = self.http.get(page_url, &[])?;
        extract_lyrics_from_html(&html)
    }

    /// Run the whole lookup for a free-text query
    pub fn fetch_lyrics(&self, query: &str) -> LyricsResult<LyricsDocument> {
        if query.is_empty() {
            return Err(LyricsError::MissingQuery);
        }

        let ResolvedSong { song, page_url } = self.resolve(query)?;
        self.notify_view(&song, &page_url);
        let lyrics = self.extract(&page_url)?;

        info!("Fetched lyrics for {} ({} characters)", song, lyrics.len());
        Ok(LyricsDocument::from_song(&song, page_url, lyrics))
    }
}

/// POST an empty JSON body to the count_view endpoint of a song
pub fn send_view_count(http: &dyn HttpClient, url: &str, referer: &str) -> Result<(), HttpClientError> {
    let headers = [
        ("accept", "*/*"),
        ("referer", referer),
        ("user-agent", COUNT_VIEW_USER_AGENT),
    ];
    http.post_json_value(url, json!({}), &headers)?;
    debug!("Counted view via {}", url);
    Ok(())
}
