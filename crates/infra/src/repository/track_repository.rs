//! # TrackRepository
//!
//! トラックの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 操作 1 ステートメント**: 書き込み系は `RETURNING` で結果行を同時に取得する
//! - **部分更新は DB 側でマージ**: `COALESCE` で未指定フィールドの現在値を維持する
//! - **削除は直前の状態を返す**: `DELETE ... RETURNING` で削除したレコードを取得する

use async_trait::async_trait;
use music_store_domain::track::{NewTrack, Track, TrackId, TrackPatch};
use sqlx::PgPool;

use crate::error::InfraError;

/// トラックリポジトリトレイト
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// トラックを挿入し、採番された ID を含むレコードを返す
    async fn insert(&self, track: &NewTrack) -> Result<Track, InfraError>;

    /// 全トラックを ID 昇順（作成順）で取得する
    async fn find_all(&self) -> Result<Vec<Track>, InfraError>;

    /// ID でトラックを検索する
    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, InfraError>;

    /// 指定フィールドだけを上書きし、更新後のレコードを返す
    ///
    /// 該当レコードがない場合は `None`。上書きするフィールドがなければ
    /// 書き込みを行わず現在のレコードを返す。
    async fn update(&self, id: TrackId, patch: &TrackPatch) -> Result<Option<Track>, InfraError>;

    /// トラックを削除し、削除直前のレコードを返す
    ///
    /// 該当レコードがない場合は `None`。
    async fn delete(&self, id: TrackId) -> Result<Option<Track>, InfraError>;
}

/// `tracks` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct TrackRow {
    id:     i64,
    artist: String,
    title:  String,
}

impl From<TrackRow> for Track {
    fn from(row: TrackRow) -> Self {
        Track::from_db(TrackId::from_i64(row.id), row.artist, row.title)
    }
}

/// PostgreSQL 実装の TrackRepository
#[derive(Debug, Clone)]
pub struct PostgresTrackRepository {
    pool: PgPool,
}

impl PostgresTrackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackRepository for PostgresTrackRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, track: &NewTrack) -> Result<Track, InfraError> {
        let row = sqlx::query_as::<_, TrackRow>(
            r#"
            INSERT INTO tracks (artist, title)
            VALUES ($1, $2)
            RETURNING id, artist, title
            "#,
        )
        .bind(&track.artist)
        .bind(&track.title)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Track>, InfraError> {
        let rows = sqlx::query_as::<_, TrackRow>(
            r#"
            SELECT id, artist, title
            FROM tracks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Track::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, InfraError> {
        let row = sqlx::query_as::<_, TrackRow>(
            r#"
            SELECT id, artist, title
            FROM tracks
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Track::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: TrackId, patch: &TrackPatch) -> Result<Option<Track>, InfraError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        // NULL は「変更しない」。空文字列は NULL ではないので上書きされる
        let row = sqlx::query_as::<_, TrackRow>(
            r#"
            UPDATE tracks
            SET artist = COALESCE($2, artist),
                title = COALESCE($3, title)
            WHERE id = $1
            RETURNING id, artist, title
            "#,
        )
        .bind(id.as_i64())
        .bind(patch.artist.as_deref())
        .bind(patch.title.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Track::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TrackId) -> Result<Option<Track>, InfraError> {
        let row = sqlx::query_as::<_, TrackRow>(
            r#"
            DELETE FROM tracks
            WHERE id = $1
            RETURNING id, artist, title
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Track::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresTrackRepository>();
        assert_send_sync::<Box<dyn TrackRepository>>();
    }

    #[test]
    fn test_track_rowからtrackに変換できる() {
        let row = TrackRow {
            id:     3,
            artist: "Artist".to_string(),
            title:  "Title".to_string(),
        };

        let track = Track::from(row);

        assert_eq!(track.id(), TrackId::from_i64(3));
        assert_eq!(track.artist(), "Artist");
        assert_eq!(track.title(), "Title");
    }
}
