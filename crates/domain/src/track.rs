//! # トラック
//!
//! カタログに登録される楽曲（アーティスト名・タイトル）を表現するドメインモデル。
//!
//! ## ライフサイクル
//!
//! - 作成: [`NewTrack`] を永続化すると、ストレージが [`TrackId`] を採番する
//! - 更新: [`TrackPatch`] で指定されたフィールドだけを上書きする（マージ）
//! - 削除: 物理削除。論理削除・履歴は持たない
//!
//! ## 使用例
//!
//! ```rust
//! use music_store_domain::track::{Track, TrackId, TrackPatch};
//!
//! let track = Track::from_db(TrackId::from_i64(1), "Artist 1", "Track 1");
//! let patch = TrackPatch {
//!     artist: None,
//!     title:  Some("New Title".to_string()),
//! };
//!
//! let updated = track.merged(&patch);
//! assert_eq!(updated.artist(), "Artist 1");
//! assert_eq!(updated.title(), "New Title");
//! ```

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// TrackId
// =========================================================================

/// トラックの一意識別子
///
/// ストレージの `BIGSERIAL` が採番する正の整数。作成後は不変。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct TrackId(i64);

impl TrackId {
    /// DB に格納された値から ID を復元する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for TrackId {
    type Err = DomainError;

    /// パスパラメータなどの文字列から ID をパースする
    ///
    /// 採番される ID は 1 以上なので、0 以下や数値でない値はエラーとする。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(DomainError::Validation(format!(
                "トラック ID は正の整数である必要があります: {s:?}"
            ))),
        }
    }
}

// =========================================================================
// Track（トラックエンティティ）
// =========================================================================

/// トラックエンティティ
///
/// `artist` / `title` には長さ・必須の制約を課さない（空文字列も有効）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    id:     TrackId,
    artist: String,
    title:  String,
}

impl Track {
    /// データベースからトラックを復元する
    pub fn from_db(id: TrackId, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            artist: artist.into(),
            title: title.into(),
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// 部分更新を適用した新しい状態を返す
    ///
    /// `patch` で `Some` のフィールドだけを上書きし、`None` は現在値を維持する。
    /// ID は変わらない。
    pub fn merged(&self, patch: &TrackPatch) -> Self {
        Self {
            id:     self.id,
            artist: patch.artist.clone().unwrap_or_else(|| self.artist.clone()),
            title:  patch.title.clone().unwrap_or_else(|| self.title.clone()),
        }
    }
}

// =========================================================================
// NewTrack / TrackPatch
// =========================================================================

/// 作成前のトラック（ID 未採番）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTrack {
    pub artist: String,
    pub title:  String,
}

impl NewTrack {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title:  title.into(),
        }
    }
}

/// トラックの部分更新
///
/// `None` は「変更しない」、`Some("")` は「空文字列で上書きする」を意味する。
/// 空文字列を未指定と同一視しない。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackPatch {
    pub artist: Option<String>,
    pub title:  Option<String>,
}

impl TrackPatch {
    /// 上書きするフィールドが 1 つもないか
    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.title.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn sample_track() -> Track {
        Track::from_db(TrackId::from_i64(1), "Artist 1", "Track 1")
    }

    // ===== TrackId =====

    #[rstest]
    #[case("1", 1)]
    #[case("999", 999)]
    #[case("9223372036854775807", i64::MAX)]
    fn test_track_id_正の整数をパースできる(#[case] input: &str, #[case] expected: i64) {
        let id: TrackId = input.parse().unwrap();
        assert_eq!(id.as_i64(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    #[case("")]
    #[case("1.5")]
    #[case("9223372036854775808")]
    fn test_track_id_正の整数以外はバリデーションエラー(#[case] input: &str) {
        let result = input.parse::<TrackId>();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_track_id_displayは数値をそのまま出力する() {
        assert_eq!(TrackId::from_i64(42).to_string(), "42");
    }

    #[test]
    fn test_track_id_serializeは数値になる() {
        let json = serde_json::to_value(TrackId::from_i64(7)).unwrap();
        assert_eq!(json, serde_json::json!(7));
    }

    // ===== Track::merged =====

    #[test]
    fn test_merged_両フィールド指定で両方上書きされる() {
        let patch = TrackPatch {
            artist: Some("New Artist".to_string()),
            title:  Some("New Title".to_string()),
        };

        let updated = sample_track().merged(&patch);

        assert_eq!(updated.id(), TrackId::from_i64(1));
        assert_eq!(updated.artist(), "New Artist");
        assert_eq!(updated.title(), "New Title");
    }

    #[test]
    fn test_merged_未指定フィールドは現在値を維持する() {
        let patch = TrackPatch {
            artist: Some("New Artist".to_string()),
            title:  None,
        };

        let updated = sample_track().merged(&patch);

        assert_eq!(updated.artist(), "New Artist");
        assert_eq!(updated.title(), "Track 1");
    }

    #[test]
    fn test_merged_空文字列は明示的なクリアとして扱う() {
        let patch = TrackPatch {
            artist: None,
            title:  Some(String::new()),
        };

        let updated = sample_track().merged(&patch);

        assert_eq!(updated.artist(), "Artist 1");
        assert_eq!(updated.title(), "");
    }

    #[test]
    fn test_merged_空のパッチでは変化しない() {
        let patch = TrackPatch::default();

        assert!(patch.is_empty());
        assert_eq!(sample_track().merged(&patch), sample_track());
    }
}
