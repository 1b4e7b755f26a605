//! # Music Store インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成、マイグレーション、疎通確認
//! - **リポジトリ実装**: トラックの CRUD を SQL に変換する
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use music_store_infra::{db, repository::PostgresTrackRepository};
//!
//! let pool = db::create_pool("postgres://localhost/music_store", 10).await?;
//! db::run_migrations(&pool).await?;
//! let repository = PostgresTrackRepository::new(pool);
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
