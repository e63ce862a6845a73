//! Gateway 应用状态

use reqwest::Client;
use std::sync::Arc;

use crate::decomposer::Decomposer;
use crate::sentiment::SentimentAnalyzer;

/// Decomposer 服务状态（分解与情感分析共用同一个 Oracle）
#[derive(Clone)]
pub struct AppState {
    decomposer: Decomposer,
    sentiment: SentimentAnalyzer,
    model: Arc<str>,
}

impl AppState {
    pub fn new(
        decomposer: Decomposer,
        sentiment: SentimentAnalyzer,
        model: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            decomposer,
            sentiment,
            model: model.into(),
        }
    }

    pub fn decomposer(&self) -> &Decomposer {
        &self.decomposer
    }

    pub fn sentiment(&self) -> &SentimentAnalyzer {
        &self.sentiment
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Relay sender 状态
#[derive(Clone)]
pub struct RelayState {
    client: Client,
    target: Arc<str>,
}

impl RelayState {
    pub fn new(client: Client, target: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            target: target.into(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// 接收端 `/receive` 的完整地址
    pub fn target(&self) -> &str {
        &self.target
    }
}
