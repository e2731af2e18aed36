use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use tone_relay::client::CompletionService;
use tone_relay::config::RelayConfig;
use tone_relay::handler::ConvertHandler;
use tone_relay::redact::SecretRedactor;
use tone_relay::validation::RequestValidator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG may come from .env, so load it before the subscriber.
    dotenvy::dotenv().ok();
    tone_relay::logging::init();
    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(e).context("loading configuration");
        }
    };
    info!(config = ?config, "starting tone-relay");

    let service = CompletionService::from_config(&config);
    let redactor = SecretRedactor::new().with_secret(config.api_key.clone().unwrap_or_default());
    let handler = ConvertHandler::new(
        service,
        RequestValidator::new(config.max_text_chars),
        redactor,
    );

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tone_relay::server::serve(listener, handler, tone_relay::server::shutdown_signal()).await?;
    Ok(())
}
