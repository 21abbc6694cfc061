use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    types::SongReference,
};

/// The JSON dialect a completion was asked to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongListFormat {
    /// `[{"song": ..., "artist": ...}]`
    Playlist,
    /// `[{"name": ..., "artist": ...}]`
    Recommendation,
}

#[derive(Deserialize)]
struct PlaylistEntry {
    song: String,
    artist: String,
}

#[derive(Deserialize)]
struct RecommendationEntry {
    name: String,
    artist: String,
}

impl From<PlaylistEntry> for SongReference {
    fn from(entry: PlaylistEntry) -> Self {
        SongReference {
            title: entry.song,
            artist: entry.artist,
        }
    }
}

impl From<RecommendationEntry> for SongReference {
    fn from(entry: RecommendationEntry) -> Self {
        SongReference {
            title: entry.name,
            artist: entry.artist,
        }
    }
}

/// Reads a completion as a list of songs.
///
/// The whole list is rejected if any entry is unreadable.
pub fn parse_song_list(raw: &str, format: SongListFormat) -> Result<Vec<SongReference>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::MalformedCompletion("completion is empty".to_string()));
    }

    match format {
        SongListFormat::Playlist => decode::<PlaylistEntry>(raw),
        SongListFormat::Recommendation => decode::<RecommendationEntry>(raw),
    }
}

fn decode<T>(raw: &str) -> Result<Vec<SongReference>>
where
    T: DeserializeOwned + Into<SongReference>,
{
    let entries: Vec<T> =
        serde_json::from_str(raw).map_err(|e| Error::MalformedCompletion(e.to_string()))?;
    Ok(entries.into_iter().map(Into::into).collect())
}
