//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラはリポジトリを直接呼び出す（トラック API はリクエストとクエリが 1 対 1 に対応する）

pub mod health;
pub mod root;
pub mod track;

pub use health::{ReadinessState, health_check, readiness_check};
pub use root::root;
pub use track::{
    TrackState,
    create_track,
    delete_track,
    get_track,
    list_tracks,
    update_track,
};
