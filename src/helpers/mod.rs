pub mod genius;
pub mod http_client;
pub mod lyrics;
