//! # トラックハンドラ
//!
//! トラックの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /tracks` - トラック作成
//! - `GET /tracks` - トラック一覧（ID 昇順）
//! - `GET /tracks/{id}` - トラック取得
//! - `PUT /tracks/{id}` - トラック部分更新
//! - `DELETE /tracks/{id}` - トラック削除
//!
//! コレクションのルートは末尾スラッシュ付き（`/tracks/`）でも受け付ける。
//!
//! ## エラー
//!
//! - `400 Bad Request`: ボディを JSON として解釈できない（型の不一致を含む）
//!
//! ボディは Content-Type ヘッダーにかかわらず JSON としてデコードする。
//! - `404 Not Found`: 該当トラックなし。正の整数でない ID も該当なしとして扱う
//! - `500 Internal Server Error`: ストレージの失敗

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use music_store_domain::track::{NewTrack, Track, TrackId, TrackPatch};
use music_store_infra::repository::TrackRepository;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CatalogError;

/// 更新成功時のメッセージ
pub const TRACK_UPDATED: &str = "Track updated successfully";
/// 削除成功時のメッセージ
pub const TRACK_DELETED: &str = "Track deleted successfully";

/// トラック API の共有状態
pub struct TrackState {
    pub repository: Arc<dyn TrackRepository>,
}

// --- リクエスト/レスポンス型 ---

/// トラック作成リクエスト
///
/// 省略または `null` のフィールドは空文字列として登録する。
#[derive(Debug, Default, Deserialize)]
pub struct CreateTrackRequest {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title:  Option<String>,
}

impl From<CreateTrackRequest> for NewTrack {
    fn from(req: CreateTrackRequest) -> Self {
        NewTrack::new(req.artist.unwrap_or_default(), req.title.unwrap_or_default())
    }
}

/// トラック更新リクエスト
///
/// 省略または `null` のフィールドは現在の値を維持する。
/// 空文字列は値として扱い、フィールドを空にする。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTrackRequest {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title:  Option<String>,
}

impl From<UpdateTrackRequest> for TrackPatch {
    fn from(req: UpdateTrackRequest) -> Self {
        TrackPatch {
            artist: req.artist,
            title:  req.title,
        }
    }
}

/// トラック DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDto {
    pub id:     i64,
    pub artist: String,
    pub title:  String,
}

impl From<Track> for TrackDto {
    fn from(track: Track) -> Self {
        Self {
            id:     track.id().as_i64(),
            artist: track.artist().to_string(),
            title:  track.title().to_string(),
        }
    }
}

/// 単一トラックのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackResponse {
    pub track: TrackDto,
}

/// トラック一覧のレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackListResponse {
    pub tracks: Vec<TrackDto>,
}

/// 更新・削除結果のレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackMessageResponse {
    pub message: String,
    pub track:   TrackDto,
}

impl TrackMessageResponse {
    fn new(message: &str, track: Track) -> Self {
        Self {
            message: message.to_string(),
            track:   track.into(),
        }
    }
}

/// パスパラメータをトラック ID に変換する
///
/// 正の整数として解釈できない値に一致するレコードは存在しないため 404 とする。
fn parse_track_id(raw: &str) -> Result<TrackId, CatalogError> {
    raw.parse().map_err(|_| CatalogError::track_not_found())
}

/// リクエストボディを JSON としてデコードする
///
/// `axum::Json` と異なり Content-Type ヘッダーは見ない。
fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, CatalogError> {
    Ok(serde_json::from_slice(body)?)
}

// --- ハンドラ ---

/// POST /tracks
///
/// トラックを作成し、採番された ID を含むレコードを返す。
///
/// ## レスポンス
///
/// - `200 OK`: 作成されたトラック
/// - `400 Bad Request`: ボディが不正
#[tracing::instrument(skip_all)]
pub async fn create_track(
    State(state): State<Arc<TrackState>>,
    body: Bytes,
) -> Result<impl IntoResponse, CatalogError> {
    let req: CreateTrackRequest = decode_body(&body)?;

    let track = state.repository.insert(&req.into()).await?;
    tracing::info!(track_id = %track.id(), "トラックを作成しました");

    Ok((
        StatusCode::OK,
        Json(TrackResponse {
            track: track.into(),
        }),
    ))
}

/// GET /tracks
///
/// 全トラックを作成順で返す。ページングは行わない。
#[tracing::instrument(skip_all)]
pub async fn list_tracks(
    State(state): State<Arc<TrackState>>,
) -> Result<impl IntoResponse, CatalogError> {
    let tracks = state.repository.find_all().await?;

    Ok((
        StatusCode::OK,
        Json(TrackListResponse {
            tracks: tracks.into_iter().map(TrackDto::from).collect(),
        }),
    ))
}

/// GET /tracks/{id}
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn get_track(
    State(state): State<Arc<TrackState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_track_id(&id)?;

    let track = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(CatalogError::track_not_found)?;

    Ok((
        StatusCode::OK,
        Json(TrackResponse {
            track: track.into(),
        }),
    ))
}

/// PUT /tracks/{id}
///
/// 指定されたフィールドだけを上書きする。
/// 存在確認をボディの解釈より先に行うため、存在しない ID には
/// ボディの内容にかかわらず 404 を返す。
///
/// ## レスポンス
///
/// - `200 OK`: メッセージと更新後のトラック
/// - `404 Not Found`: トラックが見つからない
/// - `400 Bad Request`: ボディが不正
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update_track(
    State(state): State<Arc<TrackState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_track_id(&id)?;

    if state.repository.find_by_id(id).await?.is_none() {
        return Err(CatalogError::track_not_found());
    }

    let patch = TrackPatch::from(decode_body::<UpdateTrackRequest>(&body)?);

    // 存在確認の後に削除された場合も 404
    let track = state
        .repository
        .update(id, &patch)
        .await?
        .ok_or_else(CatalogError::track_not_found)?;
    tracing::info!(track_id = %track.id(), "トラックを更新しました");

    Ok((
        StatusCode::OK,
        Json(TrackMessageResponse::new(TRACK_UPDATED, track)),
    ))
}

/// DELETE /tracks/{id}
///
/// トラックを削除し、削除直前のレコードを返す。
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_track(
    State(state): State<Arc<TrackState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_track_id(&id)?;

    let track = state
        .repository
        .delete(id)
        .await?
        .ok_or_else(CatalogError::track_not_found)?;
    tracing::info!(track_id = %track.id(), "トラックを削除しました");

    Ok((
        StatusCode::OK,
        Json(TrackMessageResponse::new(TRACK_DELETED, track)),
    ))
}
