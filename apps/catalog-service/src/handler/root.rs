//! # ルートハンドラ
//!
//! `GET /` で固定の挨拶メッセージを返す。

use axum::Json;
use serde::{Deserialize, Serialize};

/// メッセージのみのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World!".to_string(),
    })
}
