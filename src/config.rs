//! Configuration management for moodlist.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, the completion endpoint, server
//! settings, and the location of the liked-songs store.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3001";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SPOTIFY_SCOPE: &str = "user-read-private user-read-recently-played user-top-read playlist-modify-public playlist-modify-private playlist-read-private";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `moodlist/.env`. A missing file is not an error:
/// every value can also come straight from the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/moodlist/.env`
/// - macOS: `~/Library/Application Support/moodlist/.env`
/// - Windows: `%LOCALAPPDATA%/moodlist/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Returns the platform-specific data directory used by moodlist.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist");
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{key} must be set")))
}

/// Returns the address the HTTP server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:3001`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the base URL of the single-page frontend.
///
/// Browser logins are redirected to `<FRONTEND_URL>/home` once the token
/// exchange succeeds. Defaults to `http://localhost:3000`.
pub fn frontend_url() -> String {
    var_or("FRONTEND_URL", DEFAULT_FRONTEND_URL)
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which specifies
/// the callback URL that Spotify should redirect to after user authorization.
/// This must match the redirect URI registered in the Spotify application settings
/// and point at this server's `/callback` route.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the Spotify API scope permissions.
///
/// Reads `SPOTIFY_API_AUTH_SCOPE`. The default covers everything the
/// pipelines touch: profile, listening history, top items and playlist
/// modification.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the API key for the chat-completion endpoint.
///
/// # Security Note
///
/// The key should be kept confidential and never exposed in logs
/// or version control.
pub fn openai_api_key() -> Result<String> {
    required("OPENAI_API_KEY")
}

/// Returns the base URL of the OpenAI-compatible completion API.
pub fn openai_api_url() -> String {
    var_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL)
}

/// Returns the model used for completions.
pub fn openai_model() -> String {
    var_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL)
}

/// Returns the path of the liked-songs JSON file.
///
/// Reads `LIKED_SONGS_PATH`, defaulting to `liked_songs.json` inside the
/// data directory.
pub fn liked_songs_path() -> PathBuf {
    match env::var("LIKED_SONGS_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("liked_songs.json"),
    }
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

/// Everything the server needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub frontend_url: String,
    pub spotify: SpotifySettings,
    pub completion: CompletionSettings,
    pub liked_songs_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            server_addr: server_addr(),
            frontend_url: frontend_url(),
            spotify: SpotifySettings {
                api_url: spotify_apiurl(),
                auth_url: spotify_apiauth_url(),
                token_url: spotify_apitoken_url(),
                client_id: spotify_client_id()?,
                redirect_uri: spotify_redirect_uri()?,
                scope: spotify_scope(),
            },
            completion: CompletionSettings {
                api_url: openai_api_url(),
                api_key: openai_api_key()?,
                model: openai_model(),
            },
            liked_songs_path: liked_songs_path(),
        })
    }
}
