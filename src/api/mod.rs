// Import constants for use in API modules
pub use crate::constants::API_PREFIX;

// Export the landing page module
pub mod home;

// Export the lyrics module
pub mod lyrics;

// Export the server module
pub mod server;
