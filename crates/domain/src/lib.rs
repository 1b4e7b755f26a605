//! # Music Store ドメイン層
//!
//! トラック（楽曲）エンティティと、その生成・部分更新を表す値を定義する。
//!
//! ## 依存関係
//!
//! ```text
//! catalog-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない。永続化の詳細（SQL、接続プール）は
//! `music_store_infra` が担当する。
//!
//! ## モジュール構成
//!
//! - [`track`] - トラックエンティティと ID
//! - [`error`] - ドメイン層エラー定義

pub mod error;
pub mod track;

pub use error::DomainError;
