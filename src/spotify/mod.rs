//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API and the Spotify
//! accounts service. It is the integration layer between the moodlist pipelines
//! and Spotify, handling HTTP communication, authentication and error mapping.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers / CLI commands
//!          ↓
//! Pipelines (playlist builder, recommendations, stats)
//!          ↓
//! SpotifyClient (one per request, carries the caller's token)
//!     ├── Catalog (search, track details, artist details)
//!     ├── Listening history (profile, top items, recently played)
//!     └── Playlists (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Per-request credentials
//!
//! A [`SpotifyClient`] bundles a shared `reqwest::Client`, the API base URL and
//! the access token of exactly one caller. Handlers build a fresh value for each
//! request, so concurrent requests from different users never see each other's
//! token. Cloning is cheap: the underlying connection pool is shared.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 authorization code flow with PKCE: authorize URL,
//!   code exchange, refresh, and the CLI's browser-driven login.
//! - [`catalog`] - Track search and the detail lookups used for enrichment.
//! - [`user`] - The current user's profile, top items and recently played.
//! - [`playlist`] - Playlist creation and track attachment.
//!
//! ## Error Handling
//!
//! Every call goes through `error_for_status`, so non-2xx responses surface as
//! `reqwest::Error` values carrying the HTTP status. Callers decide what a
//! status means: the playlist builder retries 5xx on creation, the pipelines map
//! 401/403 to [`crate::Error::Auth`], and enrichment lookups are allowed to fail
//! silently.
//!
//! ## API Coverage
//!
//! - `GET /me`
//! - `GET /me/top/tracks`, `GET /me/top/artists`
//! - `GET /me/player/recently-played`
//! - `GET /search`
//! - `GET /tracks/{id}`, `GET /artists/{id}`
//! - `POST /users/{user_id}/playlists`
//! - `POST /playlists/{playlist_id}/tracks`
//! - `POST /api/token` (accounts service)

pub mod auth;
pub mod catalog;
pub mod playlist;
pub mod user;

use reqwest::{Client, RequestBuilder};

/// Spotify Web API client bound to one caller's access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.access_token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.access_token)
    }
}
