//! Relay 命令 - 启动消息中继的一端

use anyhow::Result;

use crate::config::Config;
use crate::gateway::{self, RelayRole};

/// 执行 relay 命令
///
/// sender 与 receiver 是两个独立进程，之间唯一的联系是 sender 发出的一次 HTTP 调用。
/// receiver 监听 `TERMINUS_PORT`，sender 监听 `TERMINUS_RELAY_SENDER_PORT`
pub async fn relay_command(config: Config, role: RelayRole) -> Result<()> {
    tracing::info!(?role, "Starting relay");
    gateway::serve_relay(config, role).await
}
