/// Data structures for Genius search results and lyrics documents
pub mod data;

/// Helper utilities: HTTP client, Genius client and lyrics extraction
pub mod helpers;

/// HTTP API routes and server setup
pub mod api;

/// Configuration loading
pub mod config;

/// Shared constants
pub mod constants;

/// Logging setup
pub mod logging;

// Re-export the main entry points for easier access
pub use data::{LyricsDocument, SongResult};
pub use helpers::genius::{GeniusClient, GeniusConfig};
pub use helpers::lyrics::{LyricsError, LyricsResult};
