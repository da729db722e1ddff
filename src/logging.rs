use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};
use env_logger::{Builder, Target, WriteStyle};

/// Available logging subsystems
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LoggingSubsystem {
    /// Main application logging
    #[serde(rename = "main")]
    Main,
    /// API routes and server setup
    #[serde(rename = "api")]
    Api,
    /// Genius search, view counting and lyrics extraction
    #[serde(rename = "genius")]
    Genius,
    /// HTTP client operations
    #[serde(rename = "http")]
    Http,
    /// Configuration loading and parsing
    #[serde(rename = "config")]
    Config,
    /// Third-party dependencies
    #[serde(rename = "deps")]
    Dependencies,
}

impl LoggingSubsystem {
    /// Get the module prefix for this subsystem
    pub fn module_prefix(&self) -> &'static str {
        match self {
            LoggingSubsystem::Main => "geniuslyrics",
            LoggingSubsystem::Api => "geniuslyrics::api",
            LoggingSubsystem::Genius => "geniuslyrics::helpers::genius,geniuslyrics::helpers::lyrics",
            LoggingSubsystem::Http => "geniuslyrics::helpers::http_client,ureq",
            LoggingSubsystem::Config => "geniuslyrics::config",
            LoggingSubsystem::Dependencies => "rocket,hyper,html5ever,selectors",
        }
    }

    /// Get all available subsystems
    pub fn all() -> Vec<LoggingSubsystem> {
        vec![
            LoggingSubsystem::Main,
            LoggingSubsystem::Api,
            LoggingSubsystem::Genius,
            LoggingSubsystem::Http,
            LoggingSubsystem::Config,
            LoggingSubsystem::Dependencies,
        ]
    }

    /// Parse subsystem name to enum
    pub fn from_name(name: &str) -> Option<LoggingSubsystem> {
        match name.to_lowercase().as_str() {
            "main" => Some(LoggingSubsystem::Main),
            "api" => Some(LoggingSubsystem::Api),
            "genius" | "lyrics" => Some(LoggingSubsystem::Genius),
            "http" => Some(LoggingSubsystem::Http),
            "config" => Some(LoggingSubsystem::Config),
            "deps" | "dependencies" => Some(LoggingSubsystem::Dependencies),
            _ => None,
        }
    }
}

/// Logging configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Target for log output (stdout, stderr, file)
    #[serde(default = "default_target")]
    pub target: String,

    /// Log file path (when target is "file")
    pub file_path: Option<String>,

    /// Whether to include timestamps
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Whether to use colored output
    #[serde(default = "default_colors")]
    pub colors: bool,

    /// Subsystem-specific log levels
    #[serde(default)]
    pub subsystems: HashMap<String, String>,

    /// Whether to include module paths in log output
    #[serde(default)]
    pub include_module_path: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_target() -> String {
    "stdout".to_string()
}

fn default_timestamps() -> bool {
    true
}

fn default_colors() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            target: default_target(),
            file_path: None,
            timestamps: default_timestamps(),
            colors: default_colors(),
            subsystems: HashMap::new(),
            include_module_path: false,
        }
    }
}

impl LoggingConfig {
    /// Read the "logging" section of the config file
    pub fn from_json(section: &serde_json::Value) -> Result<Self, String> {
        serde_json::from_value(section.clone())
            .map_err(|e| format!("Failed to parse logging config: {}", e))
    }

    /// Convert string log level to LevelFilter
    fn parse_log_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => {
                eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", level);
                LevelFilter::Info
            }
        }
    }

    /// Module filters as (module prefix, level) pairs, sorted for stable output
    fn module_filters(&self) -> Vec<(String, String)> {
        let mut filters = Vec::new();

        for (subsystem_name, level) in &self.subsystems {
            match LoggingSubsystem::from_name(subsystem_name) {
                Some(subsystem) => {
                    for prefix in subsystem.module_prefix().split(',') {
                        filters.push((prefix.trim().to_string(), level.clone()));
                    }
                }
                // Allow custom module specifications
                None => filters.push((subsystem_name.clone(), level.clone())),
            }
        }

        filters.sort();
        filters
    }

    /// Build the environment filter string in env_logger syntax
    pub fn build_filter_string(&self) -> String {
        let mut filter_parts = vec![self.level.clone()];
        for (module, level) in self.module_filters() {
            filter_parts.push(format!("{}={}", module, level));
        }
        filter_parts.join(",")
    }

    /// Initialize the logger with this configuration
    pub fn initialize_logger(&self) -> Result<(), String> {
        let filter_string = self.build_filter_string();

        let mut builder = Builder::new();

        builder.filter(None, Self::parse_log_level(&self.level));
        for (module, level) in self.module_filters() {
            builder.filter(Some(&module), Self::parse_log_level(&level));
        }

        // RUST_LOG wins over the configuration file
        builder.parse_env("RUST_LOG");

        let write_style = if self.colors {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };
        builder.write_style(write_style);

        match self.target.to_lowercase().as_str() {
            "stdout" => {
                builder.target(Target::Stdout);
            }
            "stderr" => {
                builder.target(Target::Stderr);
            }
            "file" => {
                let file_path = self
                    .file_path
                    .as_ref()
                    .ok_or_else(|| "File target specified but no file_path provided".to_string())?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(file_path)
                    .map_err(|e| format!("Failed to open log file {}: {}", file_path, e))?;
                builder.target(Target::Pipe(Box::new(file)));
                builder.write_style(WriteStyle::Never);
            }
            _ => {
                return Err(format!("Unknown logging target: {}", self.target));
            }
        }

        let include_module_path = self.include_module_path;
        let timestamps = self.timestamps;

        builder.format(move |buf, record| {
            let mut output = String::new();

            if timestamps {
                output.push_str(&format!("[{}] ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
            }

            output.push_str(&format!("[{}] ", record.level()));

            if include_module_path {
                if let Some(module) = record.module_path() {
                    output.push_str(&format!("[{}] ", module));
                }
            }

            output.push_str(&format!("{}", record.args()));

            writeln!(buf, "{}", output)
        });

        builder.try_init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;

        info!("Logging initialized with filter: {}", filter_string);
        Ok(())
    }
}

/// Initialize logging from an optional configuration and the command line flags.
///
/// `debug` raises the global level to debug regardless of the configuration.
pub fn initialize_logging(config: Option<LoggingConfig>, debug: bool) -> Result<(), String> {
    let mut config = config.unwrap_or_default();

    if debug {
        config.level = "debug".to_string();
    }

    config.initialize_logger()?;
    debug!("Debug logging enabled");
    Ok(())
}
