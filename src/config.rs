use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::DEFAULT_MAX_ITERATIONS;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub geodesic: GeodesicSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub diagnostics: DiagnosticsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeodesicSettings {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for GeodesicSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_iterations() -> u32 { DEFAULT_MAX_ITERATIONS }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsSettings {
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

impl DiagnosticsSettings {
    /// Development mode exposes the sample dataset
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

fn default_environment() -> String { "production".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GPS__)
    /// 5. Plain HOST / PORT variables
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GPS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GPS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_bind_overrides(settings)?.try_deserialize()
    }
}

/// Container platforms hand out the bind address through HOST and PORT
fn apply_bind_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(host) = env::var("HOST") {
        builder = builder.set_override("server.host", host)?;
    }
    if let Ok(port) = env::var("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|e| ConfigError::Message(format!("invalid PORT '{}': {}", port, e)))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}
