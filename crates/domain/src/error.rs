//! # ドメイン層エラー定義

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がエンティティの制約に違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
