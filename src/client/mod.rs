//! Completion Client Adapter.
//!
//! [`CompletionClient`] is the seam the request handler talks to;
//! [`ChatCompletionClient`] is the production implementation over HTTP.
//! [`CompletionService`] records whether an adapter could be built at startup.

pub mod builder;
pub mod chat;
pub mod core;
mod error_classification;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::RelayConfig;
use crate::{Error, Result};

pub use self::builder::CompletionClientBuilder;
pub use self::chat::GenerationParams;
pub use self::core::ChatCompletionClient;

/// One chat-completion call: system instruction plus user text in, text out.
///
/// Implementations must treat the call as atomic; every failure is reported
/// as an upstream error and nothing is retried.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    async fn complete(&self, system_instruction: &str, user_text: &str) -> Result<String>;
}

/// Availability of the completion adapter, decided once at startup.
#[derive(Clone)]
pub enum CompletionService {
    Ready(Arc<dyn CompletionClient>),
    Unavailable { reason: String },
}

impl CompletionService {
    pub fn ready(client: impl CompletionClient + 'static) -> Self {
        CompletionService::Ready(Arc::new(client))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        CompletionService::Unavailable {
            reason: reason.into(),
        }
    }

    /// Builds the adapter from the startup configuration.
    ///
    /// A missing key or a failed construction never aborts startup; the
    /// service comes up degraded and every conversion answers 500.
    pub fn from_config(config: &RelayConfig) -> Self {
        let Some(api_key) = config.api_key.as_deref() else {
            warn!("GROQ_API_KEY is not set; conversions will be rejected");
            return Self::unavailable("GROQ_API_KEY is not set");
        };

        let built = CompletionClientBuilder::new(api_key)
            .base_url(config.base_url.as_str())
            .transport_config(config.transport.clone())
            .build();

        match built {
            Ok(client) => {
                info!(
                    model = %client.params().model,
                    base_url = %client.base_url(),
                    "completion client ready"
                );
                Self::ready(client)
            }
            Err(e) => {
                error!(error = %e, "completion client could not be constructed");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, CompletionService::Ready(_))
    }

    /// The adapter, or `ServiceUnavailable` without touching the network.
    pub fn client(&self) -> Result<&dyn CompletionClient> {
        match self {
            CompletionService::Ready(client) => Ok(client.as_ref()),
            CompletionService::Unavailable { reason } => {
                Err(Error::service_unavailable(reason.clone()))
            }
        }
    }

    pub async fn complete(&self, system_instruction: &str, user_text: &str) -> Result<String> {
        self.client()?.complete(system_instruction, user_text).await
    }
}

impl std::fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionService::Ready(client) => {
                f.debug_tuple("Ready").field(&client.model()).finish()
            }
            CompletionService::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
