//! # Catalog Service アプリケーション構築
//!
//! State を受け取ってルーターを構築する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handler::{
    ReadinessState,
    TrackState,
    create_track,
    delete_track,
    get_track,
    health_check,
    list_tracks,
    readiness_check,
    root,
    update_track,
};

/// 全ルートを登録したルーターを構築する
pub fn build_app(track_state: Arc<TrackState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        // トラック API（コレクションは末尾スラッシュの有無どちらでも受け付ける）
        .merge(
            Router::new()
                .route("/tracks", get(list_tracks).post(create_track))
                .route("/tracks/", get(list_tracks).post(create_track))
                .route(
                    "/tracks/{id}",
                    get(get_track).put(update_track).delete(delete_track),
                )
                .with_state(track_state),
        )
        .layer(TraceLayer::new_for_http())
}
