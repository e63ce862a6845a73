//! HTTP 请求处理器

pub mod decompose;
pub mod health;
pub mod message;
pub mod relay;
pub mod sentiment;

pub use decompose::handle_decompose;
pub use health::handle_health;
pub use message::handle_message;
pub use relay::{handle_receive, handle_send};
pub use sentiment::handle_sentiment;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::decomposer::DecomposeError;
use crate::sentiment::SentimentError;

/// 错误类型标记，挂在响应 extensions 上供请求日志中间件读取
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKind(pub &'static str);

#[derive(Serialize)]
struct ErrorResponse {
    #[serde(rename = "type")]
    error_type: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl ErrorResponse {
    fn into_response_with(self, status: StatusCode) -> axum::response::Response {
        let kind = ErrorKind(self.error_type);
        let mut response = (status, Json(self)).into_response();
        response.extensions_mut().insert(kind);
        response
    }
}

impl IntoResponse for DecomposeError {
    fn into_response(self) -> axum::response::Response {
        match self {
            DecomposeError::OracleUnavailable(err) => oracle_unavailable(err.to_string()),
            DecomposeError::MalformedOracleResponse { raw, reason } => ErrorResponse {
                error_type: "malformed_oracle_response",
                message: reason,
                raw: Some(raw),
            }
            .into_response_with(StatusCode::BAD_GATEWAY),
        }
    }
}

impl IntoResponse for SentimentError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SentimentError::OracleUnavailable(err) => oracle_unavailable(err.to_string()),
            SentimentError::UnrecognizedLabel { raw } => ErrorResponse {
                error_type: "malformed_oracle_response",
                message: "unrecognized sentiment label".to_string(),
                raw: Some(raw),
            }
            .into_response_with(StatusCode::BAD_GATEWAY),
        }
    }
}

fn oracle_unavailable(message: String) -> axum::response::Response {
    ErrorResponse {
        error_type: "oracle_unavailable",
        message,
        raw: None,
    }
    .into_response_with(StatusCode::SERVICE_UNAVAILABLE)
}

fn error_response(
    status: StatusCode,
    error_type: &'static str,
    err: anyhow::Error,
) -> axum::response::Response {
    ErrorResponse {
        error_type,
        message: format!("{:#}", err),
        raw: None,
    }
    .into_response_with(status)
}
