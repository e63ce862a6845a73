//! 消息分解器
//!
//! 把 `@target #subject content` 形式的自由文本交给 Oracle 切分，
//! 再把 Oracle 的 JSON 回复解析成 [`ParsedMessage`]。

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::oracle::{Oracle, OracleError};
use crate::utils::truncate_for_log;

/// 指令版本，修改 [`SYSTEM_INSTRUCTION`] 时递增
pub const INSTRUCTION_VERSION: u32 = 1;

/// 发送给 Oracle 的 system 指令
pub const SYSTEM_INSTRUCTION: &str = "You will be provided with a sentence the sentence will have 3 parts,\n\
1. The target - written after '@' symbol.\n\
2. The subject - written after '#' symbol.\n\
3. The content - written at the end.\n\
\n\
separate them in different json parts. \n\
Generate a JSON object only. Do not include any markdown or code blocks. \
Return only raw JSON with keys: target, subject, and content.";

const LOG_PREVIEW_CHARS: usize = 200;

/// 分解结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    pub target: String,
    pub subject: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum DecomposeError {
    #[error(transparent)]
    OracleUnavailable(#[from] OracleError),

    #[error("malformed oracle response ({reason}): {raw}")]
    MalformedOracleResponse { raw: String, reason: String },
}

/// 消息分解器
///
/// 无内部可变状态，可在并发请求间共享
#[derive(Clone)]
pub struct Decomposer {
    oracle: Arc<dyn Oracle>,
}

impl Decomposer {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// 分解一条原始消息
    ///
    /// # 错误
    ///
    /// - `OracleUnavailable`: Oracle 调用本身失败，原样向上传递，不重试
    /// - `MalformedOracleResponse`: 回复不是 JSON，或缺少 `target` / `subject` / `content`
    pub async fn decompose(&self, raw_text: &str) -> Result<ParsedMessage, DecomposeError> {
        let reply = self
            .oracle
            .complete(SYSTEM_INSTRUCTION, raw_text)
            .await
            .inspect_err(|e| {
                tracing::warn!(oracle = self.oracle.name(), error = %e, "oracle call failed")
            })?;

        tracing::debug!(
            oracle = self.oracle.name(),
            reply = %truncate_for_log(&reply, LOG_PREVIEW_CHARS),
            "oracle reply"
        );

        parse_reply(&reply)
    }
}

/// 解析 Oracle 回复
///
/// 三个键都必须存在且为字符串；多余的键被忽略，字段内容不做进一步校验
pub fn parse_reply(reply: &str) -> Result<ParsedMessage, DecomposeError> {
    extract_fields(reply).map_err(|reason| {
        tracing::warn!(
            reply = %truncate_for_log(reply, LOG_PREVIEW_CHARS),
            error = %reason,
            "malformed oracle response"
        );
        DecomposeError::MalformedOracleResponse {
            raw: reply.to_string(),
            reason,
        }
    })
}

/// 只接受 JSON 对象并按键名取值，数组等按位置匹配的形式一律拒绝
fn extract_fields(reply: &str) -> Result<ParsedMessage, String> {
    let value: Value = serde_json::from_str(reply).map_err(|e| e.to_string())?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => return Err(format!("expected a JSON object, got {}", json_kind(&other))),
    };

    let field = |key: &str| -> Result<String, String> {
        match fields.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(format!("field `{key}` must be a string, got {}", json_kind(other))),
            None => Err(format!("missing field `{key}`")),
        }
    };

    Ok(ParsedMessage {
        target: field("target")?,
        subject: field("subject")?,
        content: field("content")?,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
