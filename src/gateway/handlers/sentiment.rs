//! Sentiment API 处理器

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::gateway::state::AppState;
use crate::sentiment::{Sentiment, SentimentError};

#[derive(Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SentimentResponse {
    sentiment: Sentiment,
}

/// POST /sentiment
pub async fn handle_sentiment(
    State(state): State<AppState>,
    Json(request): Json<SentimentRequest>,
) -> Result<Json<SentimentResponse>, SentimentError> {
    let sentiment = state.sentiment().analyze(&request.text).await?;
    tracing::info!(%sentiment, "classified");
    Ok(Json(SentimentResponse { sentiment }))
}
