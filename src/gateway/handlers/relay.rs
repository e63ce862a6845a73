//! Relay sender / receiver 处理器

use anyhow::Context;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::gateway::{handlers::error_response, state::RelayState};

/// sender 发出的固定消息
pub const RELAY_GREETING: &str = "Hello from app1!";

#[derive(Debug, Serialize, Deserialize)]
pub struct RelayMessage {
    pub content: String,
}

/// POST /receive
pub async fn handle_receive(Json(message): Json<RelayMessage>) -> Json<Value> {
    tracing::info!(content = %message.content, "Received message");
    Json(json!({ "status": "Message received" }))
}

/// GET /send
pub async fn handle_send(State(state): State<RelayState>) -> axum::response::Response {
    let message = RelayMessage {
        content: RELAY_GREETING.to_string(),
    };

    let result: anyhow::Result<Value> = async {
        let response = state
            .client()
            .post(state.target())
            .json(&message)
            .send()
            .await
            .with_context(|| format!("Failed to reach receiver at {}", state.target()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Receiver answered {} with a non-JSON body", status))?;

        tracing::info!(target_url = state.target(), status = status.as_u16(), "relayed");
        Ok(body)
    }
    .await;

    match result {
        Ok(body) => Json(json!({ "status": "Message sent", "response": body })).into_response(),
        Err(err) => {
            tracing::warn!("relay failed: {:#}", err);
            error_response(StatusCode::BAD_GATEWAY, "relay_failed", err)
        }
    }
}
