use std::time::Duration;
use log::{debug, error};
use serde_json::Value;
use thiserror::Error;

/// Error types that can occur when interacting with HTTP clients
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP request error: {0}")]
    RequestError(String),

    #[error("{status} error for url: {url}")]
    StatusError { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Empty response from server")]
    EmptyResponse,
}

/// Extra request headers as (name, value) pairs
pub type Headers<'a> = &'a [(&'a str, &'a str)];

/// A trait for HTTP client implementations
/// This version avoids generic methods to enable dynamic dispatch
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Send a GET request and return the response body.
    /// Any non-success status is an error.
    fn get(&self, url: &str, headers: Headers<'_>) -> Result<String, HttpClientError>;

    /// Send a POST request with a JSON payload and return the response body
    fn post_json_value(&self, url: &str, payload: Value, headers: Headers<'_>) -> Result<String, HttpClientError>;

    /// Clone the client as a boxed trait object
    fn clone_box(&self) -> Box<dyn HttpClient>;
}

// Non-generic helper function to GET and parse a JSON document
pub fn get_json(
    client: &dyn HttpClient,
    url: &str,
    headers: Headers<'_>,
) -> Result<Value, HttpClientError> {
    let response_text = client.get(url, headers)?;

    if response_text.trim().is_empty() {
        return Err(HttpClientError::EmptyResponse);
    }

    serde_json::from_str::<Value>(&response_text).map_err(|e| {
        error!("Failed to parse JSON response from {}: {}", url, e);
        HttpClientError::ParseError(e.to_string())
    })
}

impl Clone for Box<dyn HttpClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An HTTP client implementation using ureq
#[derive(Clone, Debug)]
pub struct UreqHttpClient {
    timeout: Duration,
}

impl UreqHttpClient {
    /// Create a new HTTP client with the specified timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn convert_error(url: &str, error: ureq::Error) -> HttpClientError {
        match error {
            ureq::Error::Status(status, _) => HttpClientError::StatusError {
                status,
                url: url.to_string(),
            },
            ureq::Error::Transport(transport) => HttpClientError::RequestError(transport.to_string()),
        }
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str, headers: Headers<'_>) -> Result<String, HttpClientError> {
        debug!("GET request to {}", url);

        let mut request = ureq::get(url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = request.call().map_err(|e| {
            error!("GET request to {} failed: {}", url, e);
            Self::convert_error(url, e)
        })?;

        response.into_string().map_err(|e| {
            error!("Failed to read response body: {}", e);
            HttpClientError::ParseError(format!("Failed to read response body: {}", e))
        })
    }

    fn post_json_value(&self, url: &str, payload: Value, headers: Headers<'_>) -> Result<String, HttpClientError> {
        debug!("POST request to {}", url);

        let json_string = serde_json::to_string(&payload).map_err(|e| {
            HttpClientError::ParseError(format!("Failed to serialize JSON payload: {}", e))
        })?;

        let mut request = ureq::post(url)
            .timeout(self.timeout)
            .set("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = request
            .send_string(&json_string)
            .map_err(|e| Self::convert_error(url, e))?;

        response.into_string().map_err(|e| {
            HttpClientError::ParseError(format!("Failed to read response body: {}", e))
        })
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

/// Create a new HTTP client using the default implementation
pub fn new_http_client(timeout_secs: u64) -> Box<dyn HttpClient> {
    Box::new(UreqHttpClient::new(timeout_secs))
}
