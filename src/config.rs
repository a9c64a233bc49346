use anyhow::{Context, Result, bail};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// `DATABASE_URL` value that selects the in-process store. Also the default
/// when `DATABASE_URL` is unset.
pub const MEMORY_STORE: &str = "memory";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    Postgres(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub db_max_connections: u32,
    pub balance_api_url: String,
    pub balance_api_timeout: Duration,
    pub discord_public_key: Option<String>,
    pub command_prefix: String,
    pub bind_addr: SocketAddr,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

impl Config {
    /// Expects `.env` to be loaded already (`main` does it before tracing starts).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match var("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            None => StoreBackend::Memory,
            Some(url) if url == MEMORY_STORE => StoreBackend::Memory,
            Some(url) => StoreBackend::Postgres(url),
        };

        let tls_cert_path = var("TLS_CERT_PATH");
        let tls_key_path = var("TLS_KEY_PATH");
        if tls_cert_path.is_some() != tls_key_path.is_some() {
            bail!("TLS_CERT_PATH and TLS_KEY_PATH must be set together");
        }

        let command_prefix = var("COMMAND_PREFIX").unwrap_or_else(|| "/".to_string());
        if command_prefix.trim().is_empty() {
            bail!("COMMAND_PREFIX must not be empty");
        }

        let db_max_connections: u32 = parse_or(&var, "DB_MAX_CONNECTIONS", 5)?;
        if db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let timeout_secs: u64 = parse_or(&var, "BALANCE_API_TIMEOUT_SECS", 2)?;
        if timeout_secs == 0 {
            bail!("BALANCE_API_TIMEOUT_SECS must be at least 1");
        }

        Ok(Config {
            store,
            db_max_connections,
            balance_api_url: var("BALANCE_API_URL").context("BALANCE_API_URL must be set")?,
            balance_api_timeout: Duration::from_secs(timeout_secs),
            discord_public_key: var("DISCORD_PUBLIC_KEY").filter(|k| !k.trim().is_empty()),
            command_prefix,
            bind_addr: parse_or(&var, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8443)))?,
            tls_cert_path,
            tls_key_path,
        })
    }

    /// `(cert, key)` when HTTPS is configured.
    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        Some((self.tls_cert_path.as_deref()?, self.tls_key_path.as_deref()?))
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is invalid ({raw}): {e}")),
        None => Ok(default),
    }
}
