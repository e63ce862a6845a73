use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::config::Config;

/// 连接池中每个 host 保留的空闲连接数
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// 根据配置构建 HTTP 客户端
///
/// 客户端在启动时构建一次，通过状态注入到 Oracle 和 relay sender 中
pub fn build_http_client(config: &Config, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent())
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST);

    if config.disable_tls_verify {
        tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().context("Failed to create HTTP client")
}

fn user_agent() -> String {
    format!("terminus/{}", env!("CARGO_PKG_VERSION"))
}

/// 截断过长文本，用于日志输出
///
/// 按字符截断，不会切断 UTF-8 字符
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
