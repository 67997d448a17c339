use {
    crate::adapters::bank_simulator::DEFAULT_TIMEOUT,
    std::{env, str::FromStr, time::Duration},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: cannot parse {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub log_level: String,
    pub bank_simulator_url: String,
    pub bank_timeout: Duration,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to
    /// pick up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: lookup("APP_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8090".to_string()),
            log_level: lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            bank_simulator_url: lookup("BANK_SIMULATOR_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            bank_timeout: Duration::from_secs(parse_or(
                &lookup,
                "BANK_TIMEOUT_SECS",
                DEFAULT_TIMEOUT.as_secs(),
            )?),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "APP_REQUEST_TIMEOUT_SECS",
                60,
            )?),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
