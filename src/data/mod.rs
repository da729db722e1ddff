// Data structures exchanged with Genius and API callers

pub mod lyrics_document;
pub mod search;
pub mod song;

pub use lyrics_document::LyricsDocument;
pub use search::{Hit, SearchBody, SearchResponse, Section};
pub use song::SongResult;
