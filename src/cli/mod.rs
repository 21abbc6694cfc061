//! # CLI Module
//!
//! This module provides the command-line interface layer for moodlist. It runs
//! the HTTP backend and lets the same pipelines be driven from a terminal, which
//! is handy for trying prompts without the web frontend.
//!
//! ## Command Categories
//!
//! ### Server
//!
//! - [`serve`] - Starts the HTTP backend, optionally opening the login page
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the Spotify PKCE login in the browser and caches the token
//!
//! ### Pipelines
//!
//! - [`generate`] - Builds a playlist from a prompt and reports skipped songs
//! - [`recommend`] - Prints recommendations based on listening history
//! - [`stats`] - Prints recent plays, favourites and the genre distribution
//!
//! ### Liked songs
//!
//! - [`liked`] - Lists the liked-songs store or removes an entry
//!
//! ## Credentials
//!
//! Pipeline commands take `--token` for a one-off access token. Without it, the
//! token cached by `moodlist auth` is used and refreshed when it is about to
//! expire.
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodlist auth                                   # Authenticate with Spotify
//! moodlist generate --prompt "upbeat running music"
//! moodlist recommend                              # Swipe candidates as a table
//! moodlist liked unlike 6f1c...                   # Remove a liked song
//! moodlist serve --open                           # Run the backend
//! ```
//!
//! ## Error Logging
//!
//! Commands report through the crate's logging macros. Fatal problems
//! (missing configuration, rejected token) terminate with `error!`.

mod auth;
mod generate;
mod liked;
mod recommend;
mod serve;
mod stats;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::{self, Settings},
    error,
    management::TokenManager,
    server::AppState,
    spotify::SpotifyClient,
};

pub use auth::auth;
pub use generate::generate;
pub use liked::liked;
pub use recommend::recommend;
pub use serve::serve;
pub use stats::stats;

async fn load_state() -> AppState {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}\nCopy .env.example to {}", e, config::data_dir().display()),
    };

    match AppState::from_settings(settings).await {
        Ok(state) => state,
        Err(e) => error!("Cannot open liked songs store: {}", e),
    }
}

/// Spotify client for the explicit token, or the cached one.
async fn spotify_client(state: &AppState, token: Option<String>) -> SpotifyClient {
    if let Some(token) = token {
        return state.spotify(&token);
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!(
            "Failed to load token. Please run moodlist auth or pass --token\n Error: {}",
            e
        ),
    };
    let token = token_mgr
        .get_valid_token(&state.http, &state.settings.spotify)
        .await;
    state.spotify(&token)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
