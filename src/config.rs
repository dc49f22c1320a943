use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_JWT_TTL_HOURS: i64 = 24;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_IMPORT_MAX_ROWS: usize = 5_000;
const DEFAULT_IMPORT_MAX_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub cors_origin: String,
    pub import_max_rows: usize,
    pub import_max_bytes: usize,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads configuration from the process environment, loading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let jwt_secret = get_env("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(Error::Config("JWT_SECRET must not be empty".to_string()));
        }

        let jwt_ttl_hours: i64 = get_env_parse_or("JWT_TTL_HOURS", DEFAULT_JWT_TTL_HOURS)?;
        if jwt_ttl_hours <= 0 {
            return Err(Error::Config("JWT_TTL_HOURS must be positive".to_string()));
        }

        let log_format = match env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database_url: get_env("DATABASE_URL")?,
            database_max_connections: get_env_parse_or(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            jwt_secret,
            jwt_ttl_hours,
            cors_origin: get_env_or("CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            import_max_rows: get_env_parse_or("IMPORT_MAX_ROWS", DEFAULT_IMPORT_MAX_ROWS)?,
            import_max_bytes: get_env_parse_or("IMPORT_MAX_BYTES", DEFAULT_IMPORT_MAX_BYTES)?,
            log_format,
        })
    }

    /// Configuration with defaults for everything except the two secrets.
    pub fn with_defaults(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            database_url: database_url.into(),
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            jwt_secret: jwt_secret.into(),
            jwt_ttl_hours: DEFAULT_JWT_TTL_HOURS,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            import_max_rows: DEFAULT_IMPORT_MAX_ROWS,
            import_max_bytes: DEFAULT_IMPORT_MAX_BYTES,
            log_format: LogFormat::Pretty,
        }
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_settings() {
        let config = Config::with_defaults("postgres://localhost/crm", "secret");
        assert_eq!(config.jwt_ttl_hours, 24);
        assert_eq!(config.server_address, "0.0.0.0:5000");
        assert_eq!(config.import_max_rows, 5_000);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn parse_or_falls_back_when_unset() {
        let value: u32 = get_env_parse_or("CRM_TEST_SURELY_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
