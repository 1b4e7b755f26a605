//! # リポジトリ
//!
//! ドメインエンティティの永続化を担当するトレイトと、その PostgreSQL 実装。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ハンドラはトレイトオブジェクト経由でリポジトリを受け取る
//! - **not-found は `Option`**: 該当レコードなしはエラーではなく `None` で返す
//! - **テスタビリティ**: `mock` モジュールのインメモリ実装に差し替え可能

pub mod track_repository;

pub use track_repository::{PostgresTrackRepository, TrackRepository};
