//! Stub completion adapters shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tone_relay::error_code::UpstreamErrorCode;
use tone_relay::handler::ConvertHandler;
use tone_relay::redact::SecretRedactor;
use tone_relay::validation::RequestValidator;
use tone_relay::{CompletionClient, CompletionService, Error};

pub const SECRET: &str = "gsk_test_secret_0123456789";

/// Deterministic echo of the user text.
pub fn echo_of(user_text: &str) -> String {
    format!("[echo] {}", user_text)
}

/// Echoes the user text and records every call.
#[derive(Default, Clone)]
pub struct EchoClient {
    pub calls: Arc<AtomicUsize>,
    pub last_system: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl CompletionClient for EchoClient {
    fn model(&self) -> &str {
        "echo"
    }

    async fn complete(&self, system_instruction: &str, user_text: &str) -> tone_relay::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_system.lock().unwrap() = Some(system_instruction.to_string());
        Ok(echo_of(user_text))
    }
}

/// Always fails the way a rejected key does, leaking the key in the message.
pub struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    fn model(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _system: &str, _user: &str) -> tone_relay::Result<String> {
        Err(Error::upstream(
            UpstreamErrorCode::Authentication,
            Some(401),
            format!("Invalid API Key provided: {}", SECRET),
        ))
    }
}

/// Accepts connections and never answers them.
pub async fn silent_upstream() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

pub fn handler_with(service: CompletionService) -> ConvertHandler {
    ConvertHandler::new(
        service,
        RequestValidator::default(),
        SecretRedactor::new().with_secret(SECRET),
    )
}
