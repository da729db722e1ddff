use serde::{Deserialize, Serialize};

use super::song::SongResult;

/// The payload returned to API callers for a successful lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsDocument {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub link: String,
    pub image: Option<String>,
    pub lyrics: String,
}

impl LyricsDocument {
    /// Combine the selected search result with the extracted lyrics text
    pub fn from_song(song: &SongResult, link: String, lyrics: String) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist_names.clone(),
            link,
            image: song.header_image_url.clone(),
            lyrics,
        }
    }
}
