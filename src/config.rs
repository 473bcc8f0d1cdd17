use std::env::VarError;
use std::str::FromStr;

use crate::error::Error;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const PORT: &str = "PORT";
pub const API_PREFIX: &str = "API_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` keeps questions in memory.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_address: String,
    pub port: u16,
    /// Either empty or a path starting with `/` and without a trailing slash.
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| match dotenv::var(key) {
            Ok(v) => Ok(Some(v)),
            Err(dotenv::Error::EnvVar(VarError::NotPresent)) => Ok(None),
            Err(e) => Err(e.into()),
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<Option<String>, Error>,
    {
        let get = |key: &str| -> Result<Option<String>, Error> { Ok(lookup(key)?.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())) };
        Ok(Config {
            database_url: get(DATABASE_URL)?,
            max_connections: parse_or(DATABASE_MAX_CONNECTIONS, get(DATABASE_MAX_CONNECTIONS)?, 5)?,
            bind_address: get(BIND_ADDRESS)?.unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(PORT, get(PORT)?, 8000)?,
            api_prefix: normalize_prefix(get(API_PREFIX)?.unwrap_or_default()),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, Error> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| Error::ConfigError(format!("{} has an invalid value '{}'", key, v))),
    }
}

fn normalize_prefix(prefix: String) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
