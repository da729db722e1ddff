// Common helpers for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use geniuslyrics::api::server::build_rocket;
use geniuslyrics::config::WebserverConfig;
use geniuslyrics::helpers::http_client::{Headers, HttpClient, HttpClientError};
use geniuslyrics::{GeniusClient, GeniusConfig};
use rocket::local::blocking::Client;
use serde_json::Value;

pub const BASE_URL: &str = "https://genius.test";

// Load a fixture from testdata/genius
pub fn fixture(name: &str) -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let path = format!("{}/testdata/genius/{}", manifest_dir, name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Could not read fixture {}: {}", path, e))
}

pub fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&fixture(name)).unwrap()
}

// Search URL the client builds for a query against BASE_URL
pub fn search_url(query: &str) -> String {
    format!(
        "{}/api/search/multi?per_page=5&q={}",
        BASE_URL,
        urlencoding::encode(query)
    )
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
    Fail(String),
}

/// A request as seen by [`FakeGenius`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP client answering from a URL table, recording every request it sees
#[derive(Debug, Clone, Default)]
pub struct FakeGenius {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeGenius {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, body: String) -> Self {
        self.replies.lock().unwrap().insert(url.to_string(), Reply::Body(body));
        self
    }

    pub fn respond_status(self, url: &str, status: u16) -> Self {
        self.replies.lock().unwrap().insert(url.to_string(), Reply::Status(status));
        self
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.replies.lock().unwrap().insert(url.to_string(), Reply::Fail(message.to_string()));
        self
    }

    /// (method, url) of every request made so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.recorded()
            .into_iter()
            .map(|request| (request.method, request.url))
            .collect()
    }

    /// Every request made so far, headers included
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait for a request made from a background thread, e.g. the view counter
    pub fn wait_for(&self, method: &str, url: &str) -> Option<RecordedRequest> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let found = self
                .recorded()
                .into_iter()
                .find(|request| request.method == method && request.url == url);
            if found.is_some() || Instant::now() >= deadline {
                return found;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn answer(&self, method: &str, url: &str, headers: Headers<'_>) -> Result<String, HttpClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });
        match self.replies.lock().unwrap().get(url).cloned() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(HttpClientError::StatusError {
                status,
                url: url.to_string(),
            }),
            Some(Reply::Fail(message)) => Err(HttpClientError::RequestError(message)),
            None => Err(HttpClientError::RequestError(format!("connection refused: {}", url))),
        }
    }
}

impl HttpClient for FakeGenius {
    fn get(&self, url: &str, headers: Headers<'_>) -> Result<String, HttpClientError> {
        self.answer("GET", url, headers)
    }

    fn post_json_value(&self, url: &str, _payload: Value, headers: Headers<'_>) -> Result<String, HttpClientError> {
        self.answer("POST", url, headers)
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

pub fn genius_config() -> GeniusConfig {
    GeniusConfig {
        base_url: BASE_URL.to_string(),
        ..Default::default()
    }
}

// Local Rocket client with the full route table and a fake Genius behind it
pub fn api_client(fake: FakeGenius) -> Client {
    api_client_with_config(fake, genius_config())
}

pub fn api_client_with_config(fake: FakeGenius, config: GeniusConfig) -> Client {
    let genius = Arc::new(genius_client(fake, config));
    Client::tracked(build_rocket(&WebserverConfig::default(), genius)).expect("valid rocket instance")
}

pub fn genius_client(fake: FakeGenius, config: GeniusConfig) -> GeniusClient {
    GeniusClient::with_http_client(config, Box::new(fake))
}
