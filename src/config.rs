use std::env;
use std::str::FromStr;
use std::time::Duration;
use strum::EnumString;
use tracing::Level;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    /// Required when `store_backend` is MySQL
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,

    pub api_prefix: String,
    /// Requests per minute per peer IP; 0 turns the limiter off
    pub rate_api_per_min: u32,

    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests can skip the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store_backend: StoreBackend = parse("STORE_BACKEND", var("STORE_BACKEND", "mysql"))?;

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL".to_string()));
        }

        let acquire_secs: u64 = parse("DB_ACQUIRE_TIMEOUT_SECS", var("DB_ACQUIRE_TIMEOUT_SECS", "5"))?;

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8000"),
            store_backend,
            database_url,
            db_max_connections: parse("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS", "10"))?,
            db_acquire_timeout: Duration::from_secs(acquire_secs),

            api_prefix: var("API_PREFIX", "/api"),
            rate_api_per_min: parse("RATE_API_PER_MIN", var("RATE_API_PER_MIN", "1000"))?,

            log_dir: var("LOG_DIR", "logs"),
            log_level: parse("LOG_LEVEL", var("LOG_LEVEL", "INFO"))?,
        })
    }
}

fn parse<T>(key: &str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
{
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), raw))
}
