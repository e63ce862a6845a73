//! 情感分析
//!
//! 让 Oracle 以确定性模式给文本打上 Positive / Negative / Neutral 标签。

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::oracle::{Oracle, OracleError};
use crate::utils::truncate_for_log;

/// 发送给 Oracle 的情感分析指令
pub const SENTIMENT_INSTRUCTION: &str = "Analyze the sentiment of the following text \
and respond with Positive, Negative, or Neutral.";

const LOG_PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

impl FromStr for Sentiment {
    type Err = ();

    /// 去掉首尾空白和结尾标点后按标签名匹配，忽略大小写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().trim_end_matches(['.', '!']);
        if label.eq_ignore_ascii_case("positive") {
            Ok(Sentiment::Positive)
        } else if label.eq_ignore_ascii_case("negative") {
            Ok(Sentiment::Negative)
        } else if label.eq_ignore_ascii_case("neutral") {
            Ok(Sentiment::Neutral)
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error(transparent)]
    OracleUnavailable(#[from] OracleError),

    #[error("unrecognized sentiment label: {raw}")]
    UnrecognizedLabel { raw: String },
}

#[derive(Clone)]
pub struct SentimentAnalyzer {
    oracle: Arc<dyn Oracle>,
}

impl SentimentAnalyzer {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// 分析一段文本的情感
    ///
    /// Oracle 回复不是三个标签之一时返回 `UnrecognizedLabel`，不做默认归类
    pub async fn analyze(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let reply = self
            .oracle
            .complete_deterministic(SENTIMENT_INSTRUCTION, text)
            .await?;

        reply.parse().map_err(|_| {
            tracing::warn!(
                reply = %truncate_for_log(&reply, LOG_PREVIEW_CHARS),
                "unrecognized sentiment label"
            );
            SentimentError::UnrecognizedLabel { raw: reply }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct LabelOracle {
        reply: Result<&'static str, &'static str>,
        deterministic: AtomicBool,
    }

    impl LabelOracle {
        fn new(reply: Result<&'static str, &'static str>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                deterministic: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl Oracle for LabelOracle {
        fn name(&self) -> &str {
            "label"
        }

        async fn complete(&self, _instruction: &str, _user_text: &str) -> Result<String, OracleError> {
            self.reply
                .map(str::to_string)
                .map_err(|e| OracleError::Unavailable(e.to_string()))
        }

        async fn complete_deterministic(
            &self,
            instruction: &str,
            user_text: &str,
        ) -> Result<String, OracleError> {
            assert_eq!(instruction, SENTIMENT_INSTRUCTION);
            self.deterministic.store(true, Ordering::SeqCst);
            self.complete(instruction, user_text).await
        }
    }

    #[tokio::test]
    async fn classifies_positive_reply() {
        let oracle = LabelOracle::new(Ok("Positive"));
        let analyzer = SentimentAnalyzer::new(oracle.clone());

        let sentiment = analyzer
            .analyze("I really enjoyed the new season of the show!")
            .await
            .unwrap();

        assert_eq!(sentiment, Sentiment::Positive);
        assert!(oracle.deterministic.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn tolerates_whitespace_case_and_trailing_period() {
        let analyzer = SentimentAnalyzer::new(LabelOracle::new(Ok("  negative.\n")));
        assert_eq!(analyzer.analyze("awful").await.unwrap(), Sentiment::Negative);
    }

    #[tokio::test]
    async fn rejects_unknown_label() {
        let analyzer = SentimentAnalyzer::new(LabelOracle::new(Ok("Mixed feelings")));

        match analyzer.analyze("meh").await {
            Err(SentimentError::UnrecognizedLabel { raw }) => assert_eq!(raw, "Mixed feelings"),
            other => panic!("expected unrecognized label, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn oracle_failure_is_unavailable() {
        let analyzer = SentimentAnalyzer::new(LabelOracle::new(Err("quota exceeded")));
        assert!(matches!(
            analyzer.analyze("meh").await,
            Err(SentimentError::OracleUnavailable(_))
        ));
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Sentiment::Neutral.to_string(), "Neutral");
        assert_eq!("Neutral".parse::<Sentiment>(), Ok(Sentiment::Neutral));
    }
}
