// Shared constants for the lyrics API server

/// Prefix under which all JSON API routes are mounted
pub const API_PREFIX: &str = "/api";

/// Default address the webserver binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port when neither the config file nor PORT set one
pub const DEFAULT_PORT: u16 = 1200;

/// Base URL of the Genius website and its internal API
pub const GENIUS_BASE_URL: &str = "https://genius.com";

/// Timeout for every outbound request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of results requested per search page
pub const SEARCH_PER_PAGE: u32 = 5;

/// Genius rejects requests without a browser-like user agent
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// User agent sent with view count notifications
pub const COUNT_VIEW_USER_AGENT: &str = "Mozilla/5.0";

/// Everything before the first occurrence of this marker is dropped from the lyrics
pub const VERSE_MARKER: &str = "[Verse 1]";
