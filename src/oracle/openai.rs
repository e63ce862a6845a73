//! OpenAI 兼容的 chat completions Oracle

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::oracle::{Oracle, OracleError};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    n: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

pub struct OpenAiOracle {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiOracle {
    /// 创建 OpenAI Oracle
    ///
    /// # 参数
    ///
    /// * `client` - 预先构建的 HTTP 客户端（超时由客户端决定）
    /// * `base_url` - 接口地址，如 `https://api.openai.com/v1`
    /// * `api_key` - Bearer token
    /// * `model` - 模型名称
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn chat(
        &self,
        instruction: &str,
        user_text: &str,
        temperature: Option<f32>,
    ) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.model,
            n: 1,
            temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(OracleError::Unavailable(format!(
                "OpenAI API error {}: {}",
                status, error_body
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Unavailable(format!("invalid completion envelope: {e}")))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                OracleError::Unavailable("completion contained no message content".to_string())
            })
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, instruction: &str, user_text: &str) -> Result<String, OracleError> {
        self.chat(instruction, user_text, None).await
    }

    async fn complete_deterministic(
        &self,
        instruction: &str,
        user_text: &str,
    ) -> Result<String, OracleError> {
        self.chat(instruction, user_text, Some(0.0)).await
    }
}
