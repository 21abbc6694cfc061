use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    types::{LikedSong, NewLikedSong},
};

/// Liked songs kept in memory and mirrored to a JSON file.
///
/// Every mutation rewrites the file while holding the lock, so concurrent
/// requests cannot interleave writes. Listing returns insertion order.
pub struct LikedSongStore {
    path: PathBuf,
    songs: Mutex<Vec<LikedSong>>,
}

impl LikedSongStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let songs = if path.is_file() {
            let json = async_fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Store(format!("cannot read {}: {e}", path.display())))?;
            serde_json::from_str::<Vec<LikedSong>>(&json)
                .map_err(|e| Error::Store(format!("corrupt liked songs file: {e}")))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            songs: Mutex::new(songs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn like(&self, song: NewLikedSong) -> Result<LikedSong> {
        let liked = LikedSong {
            id: Uuid::new_v4().to_string(),
            spotify_id: song.spotify_id,
            name: song.name,
            artist: song.artist,
            cover: song.cover,
            liked_at: Utc::now().timestamp(),
        };

        let mut songs = self.songs.lock().await;
        songs.push(liked.clone());
        if let Err(e) = self.persist(&songs).await {
            songs.pop();
            return Err(e);
        }
        Ok(liked)
    }

    pub async fn list(&self) -> Vec<LikedSong> {
        self.songs.lock().await.clone()
    }

    pub async fn unlike(&self, id: &str) -> Result<LikedSong> {
        let mut songs = self.songs.lock().await;
        let Some(index) = songs.iter().position(|s| s.id == id) else {
            return Err(Error::NotFound(format!("Liked song {id}")));
        };

        let removed = songs.remove(index);
        if let Err(e) = self.persist(&songs).await {
            songs.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    async fn persist(&self, songs: &[LikedSong]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(songs).map_err(|e| Error::Store(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }
}
