//! # Catalog Service ライブラリ
//!
//! トラックカタログの HTTP API を構成するモジュールを公開する。
//! 統合テストはここからルーターを組み立てる。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
