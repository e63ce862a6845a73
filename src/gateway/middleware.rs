//! Gateway 中间件

use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::Instrument;

use crate::gateway::handlers::ErrorKind;

/// 全局请求计数器，用于生成 request_id
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 请求日志中间件
pub async fn request_logger(request: Request, next: Next) -> Response {
    let request_id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "req",
        id = request_id,
        %method,
        %path,
    );

    async move {
        let start = std::time::Instant::now();
        let response = next.run(request).await;
        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if response.status().is_server_error() {
            let kind = response
                .extensions()
                .get::<ErrorKind>()
                .map(|k| k.0)
                .unwrap_or("unknown");
            tracing::warn!(status, latency_ms, kind, "failed");
        } else {
            tracing::info!(status, latency_ms, "done");
        }

        response
    }
    .instrument(span)
    .await
}
