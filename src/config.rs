use thiserror::Error;
use tracing::info;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Loads `.env` into the process environment if one exists.
///
/// Returns whether a file was found so the caller can log its absence once
/// logging is up (the file may itself configure logging).
pub fn load_dotenv() -> bool {
    dotenvy::dotenv().is_ok()
}

pub fn log_dotenv_status(found: bool) {
    if !found {
        info!("No .env file found, using process environment");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, "DATABASE_URL")?;
        let max_connections = parsed(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Self { url, max_connections })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub alpha_vantage_api_key: String,
    pub alpha_vantage_base_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let alpha_vantage_api_key = required(&lookup, "ALPHA_VANTAGE_API_KEY")?;
        let alpha_vantage_base_url = optional(&lookup, "ALPHA_VANTAGE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_ALPHA_VANTAGE_BASE_URL.to_string());
        let port = parsed(&lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            database,
            alpha_vantage_api_key,
            alpha_vantage_base_url,
            port,
        })
    }
}

fn optional<F>(lookup: &F, var: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).ok_or(ConfigError::Missing(var))
}

fn parsed<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match optional(lookup, var) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
