//! Decompose API 处理器

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::decomposer::{DecomposeError, ParsedMessage};
use crate::gateway::state::AppState;

/// 请求体
#[derive(Deserialize)]
pub struct DecomposeRequest {
    pub content: String,
}

/// POST /decompose 处理器
pub async fn handle_decompose(
    State(state): State<AppState>,
    Json(request): Json<DecomposeRequest>,
) -> Result<Json<ParsedMessage>, DecomposeError> {
    let decomposer = state.decomposer();

    tracing::info!(
        oracle = decomposer.oracle_name(),
        model = state.model(),
        chars = request.content.chars().count(),
        "request"
    );

    let parsed = decomposer.decompose(&request.content).await?;

    tracing::info!(
        to = %parsed.target,
        subject = %parsed.subject,
        "decomposed"
    );

    Ok(Json(parsed))
}
