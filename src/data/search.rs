//! Typed view of the Genius multi search response
//!
//! The provider enforces no invariants on this payload: sections and hits may
//! be empty, `null` or missing entirely. Everything is optional here and the
//! selection logic treats absence as "no hits". Hit records stay raw JSON until
//! one is picked, so oddly shaped sections the selection never reads cannot
//! fail the lookup.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::song::SongResult;

/// Section and hit types that can carry a song record
const SONG_TYPES: [&str; 2] = ["song", "lyric"];

fn is_song_type(kind: Option<&str>) -> bool {
    kind.map_or(false, |kind| SONG_TYPES.contains(&kind))
}

/// Decode a field, treating a value of the wrong type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub response: Option<SearchBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

/// A typed grouping of hits (songs, lyrics, artists, albums, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub hits: Option<Vec<Hit>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    /// Raw result record, only decoded for the selected hit
    #[serde(default)]
    pub result: Option<Value>,
}

impl Hit {
    fn song(&self) -> Option<SongResult> {
        self.result
            .as_ref()
            .filter(|record| record.is_object())
            .map(SongResult::from_record)
    }
}

impl Section {
    pub fn hits(&self) -> &[Hit] {
        self.hits.as_deref().unwrap_or_default()
    }

    /// First hit of a song type that carries a result record
    fn first_song(&self) -> Option<SongResult> {
        self.hits()
            .iter()
            .filter(|hit| is_song_type(hit.kind.as_deref()))
            .find_map(Hit::song)
    }
}

impl SearchResponse {
    pub fn sections(&self) -> &[Section] {
        self.response
            .as_ref()
            .and_then(|body| body.sections.as_deref())
            .unwrap_or_default()
    }

    /// Select the song to fetch lyrics for.
    ///
    /// Sections are visited in provider order. The first section of type
    /// "song" or "lyric" with a non-empty hit list is searched for its first
    /// hit of the same types; no scoring beyond provider order is applied.
    pub fn first_song(&self) -> Option<SongResult> {
        self.sections()
            .iter()
            .filter(|section| is_song_type(section.kind.as_deref()) && !section.hits().is_empty())
            .find_map(Section::first_song)
    }
}
