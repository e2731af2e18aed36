//! Startup configuration, read once from the process environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GROQ_API_KEY` | unset (service runs degraded) |
//! | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1` |
//! | `TONE_RELAY_HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `TONE_RELAY_HTTP_TIMEOUT_SECS` | `30` |
//! | `TONE_RELAY_PROXY_URL` | unset |
//! | `TONE_RELAY_MAX_TEXT_CHARS` | `500` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::client::CompletionClientBuilder;
use crate::transport::TransportConfig;
use crate::validation::RequestValidator;
use crate::{Error, ErrorContext, Result};

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
pub const HOST_VAR: &str = "TONE_RELAY_HOST";
pub const PORT_VAR: &str = "PORT";
pub const TIMEOUT_VAR: &str = "TONE_RELAY_HTTP_TIMEOUT_SECS";
pub const PROXY_VAR: &str = "TONE_RELAY_PROXY_URL";
pub const MAX_TEXT_CHARS_VAR: &str = "TONE_RELAY_MAX_TEXT_CHARS";

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct RelayConfig {
    /// `None` when unset or blank.
    pub api_key: Option<String>,
    pub base_url: url::Url,
    pub host: IpAddr,
    pub port: u16,
    pub transport: TransportConfig,
    pub max_text_chars: usize,
}

impl RelayConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; testable without touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR);

        let raw_base_url =
            get(BASE_URL_VAR).unwrap_or_else(|| CompletionClientBuilder::DEFAULT_BASE_URL.into());
        let base_url = url::Url::parse(&raw_base_url).map_err(|e| {
            invalid(BASE_URL_VAR, format!("{}: {}", raw_base_url, e))
        })?;

        let host = parse_or(&get, HOST_VAR, IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or(&get, PORT_VAR, DEFAULT_PORT)?;
        let timeout_secs = parse_or(&get, TIMEOUT_VAR, TransportConfig::DEFAULT_TIMEOUT_SECS)?;
        let max_text_chars =
            parse_or(&get, MAX_TEXT_CHARS_VAR, RequestValidator::DEFAULT_MAX_TEXT_CHARS)?;

        let mut transport =
            TransportConfig::default().with_timeout(Duration::from_secs(timeout_secs.max(1)));
        if let Some(proxy) = get(PROXY_VAR) {
            transport = transport.with_proxy(proxy);
        }

        Ok(Self {
            api_key,
            base_url,
            host,
            port,
            transport,
            max_text_chars: max_text_chars.max(1),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("base_url", &self.base_url.as_str())
            .field("bind_addr", &self.bind_addr())
            .field("timeout", &self.transport.timeout)
            .field("max_text_chars", &self.max_text_chars)
            .finish()
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| invalid(key, format!("{}: {}", raw, e))),
    }
}

fn invalid(key: &str, details: String) -> Error {
    Error::configuration_with_context(
        format!("invalid value for {}", key),
        ErrorContext::new()
            .with_field_path(key)
            .with_details(details)
            .with_source("config"),
    )
}
