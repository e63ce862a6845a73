//! Terminus - 消息分解服务
//!
//! 把 `@target #subject content` 形式的消息交给 LLM 补全接口切分，
//! 并返回结构化的 `{target, subject, content}`；同一个 Oracle 也用于情感分析。
//!
//! # 命令行接口
//!
//! - `serve`: 启动 Decomposer 服务（`/decompose`、`/sentiment`、`/message`）
//! - `relay`: 启动消息中继的 sender 或 receiver
//! - `test`: 向本地服务器发送测试请求

mod commands;
mod config;
mod decomposer;
mod gateway;
mod oracle;
mod sentiment;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{Config, LogFormat};
use gateway::RelayRole;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminus CLI
#[derive(Parser)]
#[command(name = "terminus")]
#[command(about = "Message decomposition service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动 Decomposer 服务
    Serve,
    /// 启动消息中继的一端
    Relay {
        /// 中继角色
        #[arg(value_enum)]
        role: RelayRole,
    },
    /// 向本地服务器发送测试请求
    Test {
        /// 要分解的文本（默认使用内置示例）
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("TERMINUS_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 解析命令行参数和配置
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Relay { role } => commands::relay_command(config, role).await,
        Commands::Test { text } => commands::test_command(config, text).await,
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "terminus=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .init(),
    }
}
