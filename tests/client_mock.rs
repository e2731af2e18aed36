//! ChatCompletionClient against a mockito chat-completion server.

mod common;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;

use tone_relay::client::{ChatCompletionClient, CompletionClientBuilder};
use tone_relay::error_code::UpstreamErrorCode;
use tone_relay::{CompletionClient, Error};

const KEY: &str = "gsk_mock_key_abcdef123456";
const PATH: &str = "/openai/v1/chat/completions";

fn client_for(server: &ServerGuard) -> ChatCompletionClient {
    CompletionClientBuilder::new(KEY)
        .base_url(format!("{}/openai/v1", server.url()))
        .build()
        .expect("client should build")
}

fn upstream_parts(err: Error) -> (UpstreamErrorCode, Option<u16>, String) {
    match err {
        Error::Upstream {
            code,
            status,
            message,
        } => (code, status, message),
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_completion_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", format!("Bearer {}", KEY).as_str())
        .match_header("x-request-id", Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "model": "llama3-8b-8192",
            "stream": false,
            "max_tokens": 1024,
            "messages": [
                {"role": "system", "content": "be formal"},
                {"role": "user", "content": "내일까지 부탁드립니다"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-123",
                "model": "llama3-8b-8192",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "내일까지 부탁드리겠습니다."},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let text = client
        .complete("be formal", "내일까지 부탁드립니다")
        .await
        .expect("completion should succeed");

    assert_eq!(text, "내일까지 부탁드리겠습니다.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_authentication_failure_is_redacted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": {
                "message": format!("Invalid API Key: {}", KEY),
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server).complete("sys", "text").await.unwrap_err();
    let (code, status, message) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::Authentication);
    assert_eq!(status, Some(401));
    assert!(message.contains("Invalid API Key"));
    assert!(!message.contains(KEY));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_quota_failure_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"You exceeded your current quota","code":"insufficient_quota"}}"#)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server).complete("sys", "text").await.unwrap_err();
    let (code, _, _) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::QuotaExhausted);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(503)
        .with_body("upstream overloaded")
        .create_async()
        .await;

    let err = client_for(&server).complete("sys", "text").await.unwrap_err();
    let (code, status, message) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::Overloaded);
    assert_eq!(status, Some(503));
    assert_eq!(message, "upstream overloaded");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server).complete("sys", "text").await.unwrap_err();
    let (code, status, _) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::MalformedResponse);
    assert_eq!(status, Some(200));
}

#[tokio::test]
async fn test_missing_content_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"length"}]}"#)
        .create_async()
        .await;

    let err = client_for(&server).complete("sys", "text").await.unwrap_err();
    let (code, _, message) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::MalformedResponse);
    assert!(message.contains("no message content"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CompletionClientBuilder::new(KEY)
        .base_url(format!("http://{}/v1", addr))
        .build()
        .unwrap();
    let err = client.complete("sys", "text").await.unwrap_err();
    let (code, status, message) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::Network);
    assert_eq!(status, None);
    assert!(!message.contains(KEY));
}

#[tokio::test]
async fn test_unanswered_request_times_out() {
    let addr = common::silent_upstream().await;
    let client = CompletionClientBuilder::new(KEY)
        .base_url(format!("http://{}/v1", addr))
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let err = client.complete("sys", "text").await.unwrap_err();
    let (code, status, message) = upstream_parts(err);
    assert_eq!(code, UpstreamErrorCode::Timeout);
    assert_eq!(status, None);
    assert!(!message.contains(KEY));
}
