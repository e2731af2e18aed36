//! Scrubs credentials out of text that may reach a caller or a log line.
//!
//! Upstream error bodies sometimes echo (part of) the key that was sent, so
//! every upstream description passes through a [`SecretRedactor`] before it
//! leaves the relay.

use once_cell::sync::Lazy;
use regex::Regex;

pub const REDACTED: &str = "[REDACTED]";

/// Bearer headers and provider-style keys (`gsk_...`, `sk-...`).
static CREDENTIAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)bearer\s+[A-Za-z0-9._\-]+|\b(?:gsk_|sk-)[A-Za-z0-9_\-]{8,}")
        .unwrap_or_else(|e| panic!("credential pattern must compile: {}", e))
});

#[derive(Clone, Default)]
pub struct SecretRedactor {
    secrets: Vec<String>,
}

impl SecretRedactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal secret; blank values are ignored.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.trim().is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in &self.secrets {
            out = out.replace(secret.as_str(), REDACTED);
        }
        CREDENTIAL_PATTERN.replace_all(&out, REDACTED).into_owned()
    }
}

impl std::fmt::Debug for SecretRedactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRedactor")
            .field("secrets", &self.secrets.len())
            .finish()
    }
}
