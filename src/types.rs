use std::time::Instant;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Where a pending OAuth login was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOrigin {
    Browser,
    Cli,
}

#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub code_verifier: String,
    pub origin: LoginOrigin,
    pub created_at: Instant,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `None` for local files, which Spotify lists in history but cannot resolve.
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<Album>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub is_playable: Option<bool>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub is_local: bool,
}

impl Track {
    pub fn cover_url(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|album| album.images.first())
            .map(|image| image.url.as_str())
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn primary_artist_id(&self) -> Option<&str> {
        self.artists.first().and_then(|a| a.id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Paging<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

// Chat completion payloads

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

// Pipeline values

#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    pub prompt: String,
    pub playlist_name: Option<String>,
    pub playlist_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongReference {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    pub external_id: String,
    pub uri: String,
    pub cover_image_url: String,
    pub external_url: String,
    pub genres: Vec<String>,
    pub is_playable: bool,
    pub preview_url: Option<String>,
}

impl ResolvedTrack {
    /// Catalog tracks only; local files have no id and yield `None`.
    pub fn from_track(track: &Track) -> Option<Self> {
        let external_id = track.id.clone()?;
        Some(ResolvedTrack {
            external_id,
            uri: track.uri.clone(),
            cover_image_url: track.cover_url().unwrap_or_default().to_string(),
            external_url: track.external_urls.spotify.clone(),
            genres: Vec::new(),
            is_playable: track.is_playable.unwrap_or(false),
            preview_url: track.preview_url.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSong {
    pub name: String,
    pub artist: String,
    pub uri: Option<String>,
    pub cover: String,
    pub external_url: String,
    pub genres: Vec<String>,
    pub is_playable: bool,
    pub preview_url: Option<String>,
}

impl RecommendedSong {
    pub fn unresolved(song: &SongReference) -> Self {
        RecommendedSong {
            name: song.title.clone(),
            artist: song.artist.clone(),
            uri: None,
            cover: String::new(),
            external_url: String::new(),
            genres: Vec::new(),
            is_playable: false,
            preview_url: None,
        }
    }

    pub fn resolved(song: &SongReference, track: ResolvedTrack) -> Self {
        RecommendedSong {
            name: song.title.clone(),
            artist: song.artist.clone(),
            uri: Some(track.uri),
            cover: track.cover_image_url,
            external_url: track.external_url,
            genres: track.genres,
            is_playable: track.is_playable,
            preview_url: track.preview_url,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.uri.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    ResolutionFailed(String),
    AttachFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSong {
    pub song: SongReference,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub struct GeneratedPlaylist {
    pub playlist: Playlist,
    pub name: String,
    pub url: String,
    pub added: Vec<ResolvedTrack>,
    pub skipped: Vec<SkippedSong>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedSong {
    pub id: String,
    /// Track URI, absent when the song was never found in the catalog.
    pub spotify_id: Option<String>,
    pub name: String,
    pub artist: String,
    pub cover: String,
    pub liked_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLikedSong {
    #[serde(default)]
    pub spotify_id: Option<String>,
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub cover: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub name: String,
    pub artists: String,
    pub cover: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub name: String,
    pub genres: Vec<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningStats {
    pub recent_tracks: Vec<TrackSummary>,
    pub top_tracks: Vec<TrackSummary>,
    pub top_artists: Vec<ArtistSummary>,
    pub genres: Vec<GenreCount>,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub name: String,
    pub artist: String,
    pub genres: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct LikedSongTableRow {
    pub id: String,
    pub name: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub genre: String,
    pub count: usize,
}
