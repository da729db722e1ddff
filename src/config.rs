// Configuration utilities for the lyrics server
//
// Settings are layered: built-in defaults, then an optional JSON config file,
// then the PORT environment variable, then command line flags (applied by the
// binary). Service sections live in a "services" subtree, with a fallback to
// top-level sections for older config files.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use crate::helpers::genius::GeniusConfig;
use crate::logging::LoggingConfig;

/// Environment variable holding the listening port
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid logging configuration: {0}")]
    Logging(String),
}

/// Helper function to get service configuration with backward compatibility
///
/// This function first tries to find the service in the "services" structure,
/// then falls back to the top-level structure.
///
/// # Arguments
/// * `config` - The configuration JSON object
/// * `service_name` - The name of the service to look up (e.g., "webserver", "genius")
///
/// # Returns
/// * `Option<&serde_json::Value>` - The service configuration if found, None otherwise
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use geniuslyrics::config::get_service_config;
///
/// let config = json!({
///   "services": {
///     "genius": { "count_views": false }
///   }
/// });
///
/// let genius = get_service_config(&config, "genius").unwrap();
/// assert_eq!(genius["count_views"], false);
///
/// let old_config = json!({
///   "webserver": { "port": 8080 }
/// });
///
/// let webserver = get_service_config(&old_config, "webserver").unwrap();
/// assert_eq!(webserver["port"], 8080);
/// ```
pub fn get_service_config<'a>(config: &'a serde_json::Value, service_name: &str) -> Option<&'a serde_json::Value> {
    if let Some(services) = config.get("services") {
        if let Some(service_config) = services.get(service_name) {
            debug!("Found {} configuration in services section", service_name);
            return Some(service_config);
        }
    }

    if let Some(service_config) = config.get(service_name) {
        debug!("Found {} configuration at top level (legacy structure)", service_name);
        return Some(service_config);
    }

    debug!("No {} configuration found in either services section or top level", service_name);
    None
}

/// Webserver bind settings
#[derive(Debug, Clone, PartialEq)]
pub struct WebserverConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebserverConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl WebserverConfig {
    pub fn from_json(config: &Value) -> Self {
        let mut webserver = WebserverConfig::default();

        if let Some(section) = get_service_config(config, "webserver") {
            if let Some(host) = section.get("host").and_then(|h| h.as_str()) {
                webserver.host = host.to_string();
            }
            if let Some(port) = section.get("port").and_then(|p| p.as_u64()) {
                match u16::try_from(port) {
                    Ok(port) => webserver.port = port,
                    Err(_) => warn!("Configured port {} is out of range, using {}", port, webserver.port),
                }
            }
        }

        webserver
    }

    /// Apply a port given as text, e.g. from the PORT environment variable.
    /// Returns false and keeps the current port if the value is not a valid port.
    pub fn apply_port_override(&mut self, value: &str) -> bool {
        match value.trim().parse::<u16>() {
            Ok(port) => {
                self.port = port;
                true
            }
            Err(e) => {
                warn!("Ignoring invalid port '{}': {}, keeping {}", value, e, self.port);
                false
            }
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub webserver: WebserverConfig,
    pub genius: GeniusConfig,
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Build the configuration from a parsed JSON config
    pub fn from_json(config: &Value) -> Result<Self, ConfigError> {
        let logging = match config.get("logging") {
            Some(section) => Some(LoggingConfig::from_json(section).map_err(ConfigError::Logging)?),
            None => None,
        };

        Ok(Self {
            webserver: WebserverConfig::from_json(config),
            genius: GeniusConfig::from_json(config),
            logging,
        })
    }

    /// Load the config file (if any) and apply the PORT environment variable
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let json = match path {
            Some(path) => load_config_file(path)?,
            None => Value::Object(Default::default()),
        };

        let mut config = Self::from_json(&json)?;

        if let Ok(port) = std::env::var(PORT_ENV) {
            if config.webserver.apply_port_override(&port) {
                debug!("Using port {} from {}", config.webserver.port, PORT_ENV);
            }
        }

        Ok(config)
    }
}

/// Read and parse a JSON config file
pub fn load_config_file(path: &Path) -> Result<Value, ConfigError> {
    let display_path = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display_path.clone(),
        source,
    })?;

    let value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display_path.clone(),
        source,
    })?;

    info!("Loaded configuration from {}", display_path);
    Ok(value)
}
