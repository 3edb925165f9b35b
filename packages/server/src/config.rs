use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub api_secret_key: String,
    pub host: String,
    pub port: u16,
    pub pending_login_ttl: Duration,
    pub pending_login_sweep_interval: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_secret_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("pending_login_ttl", &self.pending_login_ttl)
            .field("pending_login_sweep_interval", &self.pending_login_sweep_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_secret_key = lookup("API_SECRET_KEY").context("API_SECRET_KEY must be set")?;
        if api_secret_key.trim().is_empty() {
            bail!("API_SECRET_KEY must not be empty");
        }

        Ok(Self {
            api_secret_key,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", 8000)?,
            pending_login_ttl: parse_secs(&lookup, "PENDING_LOGIN_TTL_SECS", 600)?,
            pending_login_sweep_interval: parse_secs(&lookup, "PENDING_LOGIN_SWEEP_SECS", 60)?,
            request_timeout: parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", 60)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(value) => parse_value(name, &value),
        None => Ok(default),
    }
}

/// A whole number of seconds; zero is rejected.
fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
) -> Result<Duration> {
    let secs = parse_var(lookup, name, default)?;
    if secs == 0 {
        bail!("{} must be greater than zero", name);
    }
    Ok(Duration::from_secs(secs))
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a valid number", name))
}
