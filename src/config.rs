//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - Oracle（OpenAI 兼容接口）的凭据、模型和超时
//! - Relay sender 的监听端口、目标地址和超时

use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_RELAY_TARGET: &str = "http://localhost:8000/receive";
const DEFAULT_RELAY_SENDER_PORT: u16 = 8001;
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 30;

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// 应用配置
///
/// 在进程启动时构造一次，之后以参数形式传递给各个组件
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口（decomposer 与 relay receiver 使用）
    pub port: u16,
    /// Relay sender 的监听端口，与 receiver 错开以便同机运行
    pub relay_sender_port: u16,
    /// OpenAI API 密钥，仅 `serve` 命令需要
    pub openai_api_key: Option<String>,
    /// OpenAI 兼容接口的 base URL
    pub openai_base_url: String,
    /// 补全模型
    pub model: String,
    /// Oracle HTTP 请求超时
    pub oracle_timeout: Duration,
    /// Relay sender 发送消息的目标地址
    pub relay_target: String,
    /// Relay sender 调用 receiver 的超时
    pub relay_timeout: Duration,
    /// 是否禁用 TLS 证书校验（仅用于调试）
    pub disable_tls_verify: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `TERMINUS_HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `TERMINUS_PORT`: 服务器监听端口（默认: 8000）
    /// - `OPENAI_API_KEY`: Oracle 凭据
    /// - `TERMINUS_MODEL`: 模型（默认: "gpt-4o"）
    /// - `TERMINUS_OPENAI_BASE_URL`: 接口地址（默认: "https://api.openai.com/v1"）
    /// - `TERMINUS_ORACLE_TIMEOUT_SECS`: Oracle 超时秒数（默认: 60）
    /// - `TERMINUS_RELAY_TARGET`: Relay 目标（默认: "http://localhost:8000/receive"）
    /// - `TERMINUS_RELAY_SENDER_PORT`: Relay sender 监听端口（默认: 8001）
    /// - `TERMINUS_RELAY_TIMEOUT_SECS`: Relay 调用超时秒数（默认: 30）
    /// - `TERMINUS_DISABLE_TLS_VERIFY`: "1" 或 "true" 时禁用 TLS 校验
    /// - `TERMINUS_LOG_FORMAT`: "json" 或 "pretty"（默认）
    ///
    /// # 错误
    ///
    /// - 如果端口或超时不是有效数字
    /// - 如果日志格式无法识别
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("TERMINUS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("TERMINUS_PORT") {
            Some(v) => v
                .parse()
                .context("TERMINUS_PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let relay_sender_port = match lookup("TERMINUS_RELAY_SENDER_PORT") {
            Some(v) => v
                .parse()
                .context("TERMINUS_RELAY_SENDER_PORT must be a valid port number")?,
            None => DEFAULT_RELAY_SENDER_PORT,
        };

        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());

        let openai_base_url = lookup("TERMINUS_OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = lookup("TERMINUS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match lookup("TERMINUS_ORACLE_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .context("TERMINUS_ORACLE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_ORACLE_TIMEOUT_SECS,
        };

        let relay_target =
            lookup("TERMINUS_RELAY_TARGET").unwrap_or_else(|| DEFAULT_RELAY_TARGET.to_string());

        let relay_timeout_secs = match lookup("TERMINUS_RELAY_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .context("TERMINUS_RELAY_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_RELAY_TIMEOUT_SECS,
        };

        let disable_tls_verify = lookup("TERMINUS_DISABLE_TLS_VERIFY")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let log_format = match lookup("TERMINUS_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("Unknown TERMINUS_LOG_FORMAT: {other}"),
        };

        Ok(Self {
            host,
            port,
            relay_sender_port,
            openai_api_key,
            openai_base_url,
            model,
            oracle_timeout: Duration::from_secs(timeout_secs),
            relay_target,
            relay_timeout: Duration::from_secs(relay_timeout_secs),
            disable_tls_verify,
            log_format,
        })
    }

    /// 获取 OpenAI API 密钥
    ///
    /// # 错误
    ///
    /// - 如果 `OPENAI_API_KEY` 未设置
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY environment variable is required")
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sender_listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.relay_sender_port)
    }
}
