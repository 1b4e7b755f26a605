//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! music-store-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use music_store_domain::track::{NewTrack, Track, TrackId, TrackPatch};

use crate::{error::InfraError, repository::TrackRepository};

// ===== MockTrackRepository =====

/// `BIGSERIAL` と同じく、削除された ID を再利用しない
#[derive(Default)]
struct MockTrackStore {
    tracks:  Vec<Track>,
    last_id: i64,
}

#[derive(Clone, Default)]
pub struct MockTrackRepository {
    store: Arc<Mutex<MockTrackStore>>,
}

impl MockTrackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在格納されているトラックを ID 順で返す
    pub fn tracks(&self) -> Vec<Track> {
        self.store.lock().unwrap().tracks.clone()
    }
}

#[async_trait]
impl TrackRepository for MockTrackRepository {
    async fn insert(&self, track: &NewTrack) -> Result<Track, InfraError> {
        let mut store = self.store.lock().unwrap();
        store.last_id += 1;
        let created = Track::from_db(
            TrackId::from_i64(store.last_id),
            track.artist.clone(),
            track.title.clone(),
        );
        store.tracks.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Track>, InfraError> {
        Ok(self.tracks())
    }

    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, InfraError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .tracks
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn update(&self, id: TrackId, patch: &TrackPatch) -> Result<Option<Track>, InfraError> {
        let mut store = self.store.lock().unwrap();
        let Some(slot) = store.tracks.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        if !patch.is_empty() {
            *slot = slot.merged(patch);
        }
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: TrackId) -> Result<Option<Track>, InfraError> {
        let mut store = self.store.lock().unwrap();
        let Some(index) = store.tracks.iter().position(|t| t.id() == id) else {
            return Ok(None);
        };
        Ok(Some(store.tracks.remove(index)))
    }
}
