use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::error::{AppError, Result};

pub const DEFAULT_PARSE_ENDPOINT: &str = "http://localhost:8000/api/v1/parse";

/// Parse service configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub cache_ttl: chrono::Duration,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "8000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let cors_origin = HeaderValue::from_str(&origin)
            .map_err(|e| AppError::ConfigError(format!("Invalid CORS origin: {}", e)))?;

        let cache_ttl = seconds(&lookup, "CACHE_TTL_SECS", 24 * 60 * 60)?;
        let fetch_timeout = seconds(&lookup, "FETCH_TIMEOUT_SECS", 10)?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            cors_origin,
            cache_ttl: chrono::Duration::seconds(i64::from(cache_ttl)),
            fetch_timeout: Duration::from_secs(u64::from(fetch_timeout)),
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u32) -> Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}

/// Front-end configuration: where parse requests are sent.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub parse_endpoint: String,
}

impl ClientConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_endpoint = lookup("PARSE_ENDPOINT").unwrap_or_else(|| DEFAULT_PARSE_ENDPOINT.to_string());
        if !parse_endpoint.starts_with("http") {
            return Err(AppError::ConfigError(format!("Invalid parse endpoint: {}", parse_endpoint)));
        }
        Ok(ClientConfig { parse_endpoint })
    }
}
