//! # Catalog Service エラー定義
//!
//! Catalog Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use music_store_shared::ErrorResponse;
use thiserror::Error;

/// リクエストボディを解釈できなかったときの detail
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
/// トラックが存在しないときの detail
pub const TRACK_NOT_FOUND: &str = "Track not found";

/// Catalog Service で発生するエラー
#[derive(Debug, Error)]
pub enum CatalogError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] music_store_infra::InfraError),
}

impl CatalogError {
    pub fn track_not_found() -> Self {
        Self::NotFound(TRACK_NOT_FOUND.to_string())
    }
}

/// JSON の構文エラーと型の不一致は区別せず 400 にまとめる
impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        tracing::debug!(error = %e, "リクエストボディを解釈できません");
        Self::BadRequest(INVALID_REQUEST_BODY.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let body = match self {
            CatalogError::NotFound(detail) => ErrorResponse::not_found(detail),
            CatalogError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            CatalogError::Database(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    error.kind = "database",
                    "データベースエラー: {}\n{}",
                    e,
                    e.span_trace()
                );
                ErrorResponse::internal_error()
            }
        };

        let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
