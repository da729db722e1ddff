/// Song record as returned inside a Genius search hit
use std::fmt;
use serde::{Serialize, Deserialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SongResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_names: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Canonical lyrics page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,

    /// API path like "/songs/378195", the last segment is the song id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
}

impl SongResult {
    /// Read a raw search result record. Fields that are missing or not strings are left empty.
    pub fn from_record(record: &Value) -> Self {
        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);
        SongResult {
            artist_names: text("artist_names"),
            title: text("title"),
            url: text("url"),
            header_image_url: text("header_image_url"),
            api_path: text("api_path"),
        }
    }

    /// The lyrics page URL, if the record carries a non-empty one
    pub fn page_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Numeric song id derived from the final segment of `api_path`
    pub fn song_id(&self) -> Option<&str> {
        self.api_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .and_then(|path| path.rsplit('/').next())
    }
}

impl fmt::Display for SongResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut display_str = self.title.as_deref().unwrap_or("Unknown Title").to_string();
        if let Some(artist_name) = &self.artist_names {
            if !artist_name.is_empty() {
                display_str.push_str(" by ");
                display_str.push_str(artist_name);
            }
        }
        write!(f, "{}", display_str)
    }
}
