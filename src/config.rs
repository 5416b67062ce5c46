use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub preferences: PreferenceSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

/// Where the preference profile and portfolio come from. The named settings
/// document in the database wins; the files are the fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceSettings {
    #[serde(default = "default_config_name")]
    pub config_name: String,
    #[serde(default = "default_preferences_file")]
    pub file: String,
    #[serde(default = "default_portfolio_file")]
    pub portfolio_file: String,
}

fn default_config_name() -> String { "job_preferences".to_string() }
fn default_preferences_file() -> String { "config/preferences.yaml".to_string() }
fn default_portfolio_file() -> String { "config/portfolio.yaml".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_max_tokens() -> u32 { 2048 }
fn default_temperature() -> f64 { 0.7 }
fn default_max_retries() -> u32 { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with GIGMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with GIGMATCH_)
            // e.g., GIGMATCH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GIGMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GIGMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute well-known environment variables into config values.
/// DATABASE_URL and LLM_API_KEY are checked first for compatibility with
/// hosting platforms that inject them directly.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("GIGMATCH_DATABASE__URL"))
        .ok();
    let api_key = env::var("LLM_API_KEY")
        .or_else(|_| env::var("GIGMATCH_LLM__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = database_url {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(key) = api_key {
        builder = builder.set_override("llm.api_key", key)?;
    }

    builder.build()
}
