//! # API Module
//!
//! HTTP endpoints served by moodlist. Every handler is an async function taking
//! the shared [`crate::server::AppState`] through an `Extension`, and returns
//! either JSON or a [`crate::Error`] rendered as `{"error": "..."}` with a
//! matching status code.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's authorize page (PKCE).
//! - [`callback`] - Completes the code exchange. Browser logins are sent on to
//!   the frontend with their tokens; CLI logins hand the token to the waiting
//!   command.
//! - [`refresh`] - Trades a refresh token for a new access token.
//! - [`logout`] - Acknowledges a logout (GET or POST); no server-side session exists.
//!
//! ### Playlists and recommendations
//!
//! - [`generate_playlist`] - Prompt to a new playlist.
//! - [`create_playlist`] - Playlist from an explicit list of track URIs.
//! - [`get_songs`] - Recommendations from the caller's listening history.
//! - [`stats`] - Listening statistics and genre distribution.
//!
//! ### Liked songs
//!
//! - [`like_song`], [`liked_songs`], [`unlike_song`] - CRUD over the store.
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version.
//!
//! ## Credentials
//!
//! Spotify access tokens are passed by the caller on every request (query
//! string or JSON body) and never stored by the server.

mod callback;
mod health;
mod likes;
mod playlist;
mod songs;

pub use callback::{callback, login, logout, refresh};
pub use health::health;
pub use likes::{like_song, liked_songs, unlike_song};
pub use playlist::{
    CreatePlaylistResponse, GenerateResponse, create_playlist, generate_playlist,
};
pub use songs::{SongsResponse, get_songs, stats};
