//! # tone-relay
//!
//! HTTP relay that rewrites a short piece of workplace text for a chosen
//! audience (a superior, a peer on another team, or a customer) by forwarding
//! an audience-specific instruction to a hosted chat-completion model.
//!
//! ## Flow
//!
//! `POST /api/convert` → [`handler::ConvertHandler`] → availability check →
//! [`validation::RequestValidator`] → [`prompt`] template →
//! [`client::CompletionClient`] → JSON response.
//!
//! There is no retry, caching, rate limiting or persistence. The only shared
//! state is the template table (static data) and the completion adapter built
//! once at startup; both are read-only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tone_relay::client::CompletionService;
//! use tone_relay::config::RelayConfig;
//! use tone_relay::handler::ConvertHandler;
//! use tone_relay::redact::SecretRedactor;
//! use tone_relay::validation::RequestValidator;
//!
//! #[tokio::main]
//! async fn main() -> tone_relay::Result<()> {
//!     let config = RelayConfig::from_env()?;
//!     let handler = ConvertHandler::new(
//!         CompletionService::from_config(&config),
//!         RequestValidator::new(config.max_text_chars),
//!         SecretRedactor::new().with_secret(config.api_key.clone().unwrap_or_default()),
//!     );
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//!     tone_relay::server::serve(listener, handler, tone_relay::server::shutdown_signal()).await
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prompt`] | Audience enum and prompt template table |
//! | [`validation`] | Request validator |
//! | [`client`] | Completion client adapter and availability state |
//! | [`transport`] | Outbound HTTP transport |
//! | [`handler`] | Request orchestration |
//! | [`server`] | axum router |
//! | [`config`] | Environment configuration |

pub mod client;
pub mod config;
pub mod error_code;
pub mod handler;
pub mod logging;
pub mod prompt;
pub mod redact;
pub mod server;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::{CompletionClient, CompletionService};
pub use handler::ConvertHandler;
pub use prompt::{Audience, PromptTemplate};
pub use types::{ConversionRequest, ConversionResult};

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the crate
pub mod error;
pub use error::{Error, ErrorContext};
