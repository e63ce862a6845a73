//! Oracle 抽象层
//!
//! Oracle 是外部文本补全服务：输入 (system 指令, 用户文本)，输出一段文本。
//! Decomposer 只依赖这里的 trait，生产环境绑定 OpenAI 客户端，测试绑定桩实现。

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiOracle;

/// Oracle 调用失败
///
/// 网络错误、超时、认证/配额错误以及无法识别的响应信封都归入此类
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

/// Oracle Trait - 文本补全服务的统一接口
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Oracle 名称（用于日志）
    fn name(&self) -> &str;

    /// 使用给定指令补全用户文本，只请求一个回复
    async fn complete(&self, instruction: &str, user_text: &str) -> Result<String, OracleError>;

    /// 与 `complete` 相同，但要求确定性输出（temperature 0），用于分类类任务
    ///
    /// 不支持采样参数的实现直接退回到 `complete`
    async fn complete_deterministic(
        &self,
        instruction: &str,
        user_text: &str,
    ) -> Result<String, OracleError> {
        self.complete(instruction, user_text).await
    }
}
