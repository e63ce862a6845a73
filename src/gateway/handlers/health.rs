//! 健康检查处理器

use axum::{extract::State, Json};
use serde::Serialize;

use crate::decomposer::INSTRUCTION_VERSION;
use crate::gateway::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    oracle: String,
    model: String,
    instruction_version: u32,
}

/// GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        oracle: state.decomposer().oracle_name().to_string(),
        model: state.model().to_string(),
        instruction_version: INSTRUCTION_VERSION,
    })
}
