//! 消息回显处理器

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    name: Option<String>,
    chat: Option<String>,
}

#[derive(Serialize)]
pub struct MessageAck {
    received: bool,
    name: Option<String>,
    chat: Option<String>,
}

/// GET /message?name=..&chat=..
///
/// 记录并回显查询参数，缺失的参数以 null 返回
pub async fn handle_message(Query(query): Query<MessageQuery>) -> Json<MessageAck> {
    tracing::info!(name = ?query.name, chat = ?query.chat, "message");
    Json(MessageAck {
        received: true,
        name: query.name,
        chat: query.chat,
    })
}
