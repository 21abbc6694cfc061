use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{
    config::{self, SpotifySettings},
    error::{Error, Result},
    spotify,
    types::Token,
    warning,
};

/// Seconds before expiry at which a cached token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| Error::Store(format!("cannot read {}: {e}", path.display())))?;
        let token: Token =
            serde_json::from_str(&content).map_err(|e| Error::Store(e.to_string()))?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.token).map_err(|e| Error::Store(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    /// Returns an access token, refreshing and re-persisting it when close to expiry.
    ///
    /// A failed refresh keeps the old token; Spotify will reject it and the
    /// caller sees an auth error.
    pub async fn get_valid_token(&mut self, http: &Client, settings: &SpotifySettings) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(http, settings, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to cache refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
