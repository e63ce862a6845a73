//! Serve 命令 - 启动 Decomposer 服务
//!
//! 此模块实现 `serve` 命令，启动提供 `POST /decompose` 的 HTTP 服务器。

use anyhow::Result;

use crate::config::Config;
use crate::gateway;

/// 执行服务器启动命令
///
/// # 功能
///
/// - 使用 `OPENAI_API_KEY` 构建 Oracle 客户端
/// - 初始化 HTTP 路由和中间件
/// - 启动服务器并等待关闭信号（Ctrl+C 或 SIGTERM）
pub async fn serve_command(config: Config) -> Result<()> {
    gateway::serve(config).await
}
