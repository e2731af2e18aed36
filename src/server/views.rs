use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::handler::{ConvertHandler, BODY_TOO_LARGE_MESSAGE, UNREADABLE_BODY_MESSAGE};
use crate::types::ConversionResult;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness only; does not check the completion service.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn convert(
    State(handler): State<Arc<ConvertHandler>>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<ConversionResult>) {
    // Body-limit and read failures keep the `{"error": ..}` shape.
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let status = rejection.status();
            warn!(%status, reason = %rejection.body_text(), "conversion rejected: unreadable body");
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                BODY_TOO_LARGE_MESSAGE
            } else {
                UNREADABLE_BODY_MESSAGE
            };
            return (status, Json(ConversionResult::failed(message)));
        }
    };
    let (status, result) = handler.handle(&body).await;
    (status, Json(result))
}
