//! Process configuration, read once at startup.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use screenplay_core::beat::MAX_BEAT_CORRECTIONS;
use screenplay_llm::api::CALL_TIMEOUT;
use screenplay_llm::LlmConfig;

/// Origin of the screenwriting client during local development.
pub const DEV_CLIENT_ORIGIN: &str = "http://localhost:3000";

/// Covers beat generation at its worst: the first call and every correction
/// each running to [`CALL_TIMEOUT`], plus slack for the handler itself.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 =
    (1 + MAX_BEAT_CORRECTIONS as u64) * CALL_TIMEOUT.as_secs() + 30;

/// Settings for the HTTP server and the completion provider behind it.
///
/// | Env Var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:3000` |
/// | `REQUEST_TIMEOUT_SECS` | `360`                   |
///
/// Provider variables are documented on [`LlmConfig::from_lookup`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in the environment.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Malformed numbers abort startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEV_CLIENT_ORIGIN.to_string()]);

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", lookup("PORT"), 3000),
            cors_origins,
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                lookup("REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            llm: LlmConfig::from_lookup(&lookup),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be valid: {e}")),
        None => default,
    }
}
