//! Test 命令 - 发送测试请求到本地服务器
//!
//! 此模块实现 `test` 命令，用于向本地运行的 Terminus 服务器发送一条示例消息，
//! 验证分解流程是否正常工作。

use anyhow::{Context, Result};
use serde_json::json;

use crate::config::Config;

/// 未指定文本时使用的示例消息
pub const SAMPLE_MESSAGE: &str = "@hr #leave I am going to leave the company on 10 April 2023. \
Please let me know if you need any further information.";

/// 执行测试命令
///
/// # 参数
///
/// * `config` - 应用配置，用于获取服务器地址
/// * `text` - 要分解的文本，缺省时使用 [`SAMPLE_MESSAGE`]
pub async fn test_command(config: Config, text: Option<String>) -> Result<()> {
    println!("Sending test request to local server...");

    let content = text.unwrap_or_else(|| SAMPLE_MESSAGE.to_string());
    let url = format!("http://{}/decompose", local_addr(&config));

    println!("Request URL: {}", url);
    println!("Message: {}", content);

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "content": content }))
        .send()
        .await
        .context("Request failed. Make sure the server is running.")?;

    let status = response.status();
    println!("Response status: {}", status);

    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("Request failed: {}", body);
    }

    println!("Response:");
    println!("{}", body);

    Ok(())
}

/// 监听 0.0.0.0 时改为连接本机回环地址
fn local_addr(config: &Config) -> String {
    let host = if config.host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        config.host.as_str()
    };
    format!("{}:{}", host, config.port)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(host: &str) -> Config {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.host = host.to_string();
        config.port = 8000;
        config
    }

    #[test]
    fn wildcard_host_targets_loopback() {
        assert_eq!(local_addr(&config_with("0.0.0.0")), "127.0.0.1:8000");
        assert_eq!(local_addr(&config_with("10.0.0.5")), "10.0.0.5:8000");
    }
}
