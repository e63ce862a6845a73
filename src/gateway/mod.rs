//! Gateway 应用层
//!
//! HTTP 服务器和请求处理

mod handlers;
mod middleware;
mod state;

pub use state::{AppState, RelayState};

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::decomposer::Decomposer;
use crate::oracle::{OpenAiOracle, Oracle};
use crate::sentiment::SentimentAnalyzer;
use crate::utils::build_http_client;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Relay 服务角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RelayRole {
    /// 提供 GET /send，向接收端转发固定消息
    Sender,
    /// 提供 POST /receive，记录收到的消息
    Receiver,
}

/// 启动 Decomposer 服务
pub async fn serve(config: Config) -> Result<()> {
    let api_key = config.require_api_key()?;
    let client = build_http_client(&config, config.oracle_timeout)?;
    let oracle = OpenAiOracle::new(client, &config.openai_base_url, api_key, &config.model);

    tracing::info!(
        model = oracle.model(),
        base_url = %config.openai_base_url,
        timeout_secs = config.oracle_timeout.as_secs(),
        "Oracle configured"
    );

    let oracle: Arc<dyn Oracle> = Arc::new(oracle);
    let state = AppState::new(
        Decomposer::new(oracle.clone()),
        SentimentAnalyzer::new(oracle),
        config.model.as_str(),
    );
    run(&config.listen_addr(), build_router(state)).await
}

/// 启动 Relay 的一端
pub async fn serve_relay(config: Config, role: RelayRole) -> Result<()> {
    match role {
        RelayRole::Receiver => run(&config.listen_addr(), build_receiver_router()).await,
        RelayRole::Sender => {
            let client = build_http_client(&config, config.relay_timeout)?;
            tracing::info!("Relaying to {}", config.relay_target);
            let app = build_sender_router(RelayState::new(client, config.relay_target.as_str()));
            run(&config.sender_listen_addr(), app).await
        }
    }
}

async fn run(listen_addr: &str, app: Router) -> Result<()> {
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", listen_addr))?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/decompose", post(handlers::handle_decompose))
        .route("/sentiment", post(handlers::handle_sentiment))
        .route("/message", get(handlers::handle_message))
        .route("/health", get(handlers::handle_health))
        .with_state(state);

    with_layers(routes)
}

fn build_receiver_router() -> Router {
    with_layers(Router::new().route("/receive", post(handlers::handle_receive)))
}

fn build_sender_router(state: RelayState) -> Router {
    with_layers(
        Router::new()
            .route("/send", get(handlers::handle_send))
            .with_state(state),
    )
}

fn with_layers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(axum_middleware::from_fn(middleware::request_logger))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            )),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    tokio::select! {
        _ = ctrl_c => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
