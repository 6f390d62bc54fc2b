//! Process configuration from environment variables (a `.env` file is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/garage_drives";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const DEV_SECRET_KEY: &str = "secret-dev";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub secret_key: String,
    pub db_max_connections: u32,
    pub token_ttl_secs: i64,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take defaults; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = match lookup("SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(s) => s,
            None => {
                tracing::warn!("SECRET_KEY not set, using development secret");
                DEV_SECRET_KEY.to_string()
            }
        };
        Ok(AppConfig {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?,
            secret_key,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", "5")?,
            token_ttl_secs: parse_or(&lookup, "TOKEN_TTL_SECS", "86400")?,
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", "65536")?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}
