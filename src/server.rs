use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use reqwest::Client;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::{
    api,
    config::Settings,
    error::{Error, Result},
    info,
    llm::CompletionClient,
    management::LikedSongStore,
    pipeline::RetryPolicy,
    spotify::SpotifyClient,
    types::{PendingLogin, Token},
};

/// Shared state handed to every handler.
///
/// Holds nothing caller-specific: access tokens arrive with each request and
/// are turned into a [`SpotifyClient`] by [`AppState::spotify`].
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http: Client,
    pub completion: Arc<CompletionClient>,
    pub likes: Arc<LikedSongStore>,
    pub retry: RetryPolicy,
    pub pending_logins: Arc<Mutex<HashMap<String, PendingLogin>>>,
    pub cli_token: Arc<Mutex<Option<Token>>>,
}

impl AppState {
    pub fn new(settings: Settings, likes: LikedSongStore) -> Self {
        let http = Client::new();
        let completion = CompletionClient::new(http.clone(), &settings.completion);
        Self {
            settings: Arc::new(settings),
            http,
            completion: Arc::new(completion),
            likes: Arc::new(likes),
            retry: RetryPolicy::default(),
            pending_logins: Arc::new(Mutex::new(HashMap::new())),
            cli_token: Arc::new(Mutex::new(None)),
        }
    }

    /// Opens the liked-songs store named in `settings` and builds the state.
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        let likes = LikedSongStore::open(settings.liked_songs_path.clone()).await?;
        Ok(Self::new(settings, likes))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// A Spotify client bound to one caller's token.
    pub fn spotify(&self, access_token: &str) -> SpotifyClient {
        SpotifyClient::new(
            self.http.clone(),
            self.settings.spotify.api_url.clone(),
            access_token,
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh-token", get(api::refresh))
        .route("/logout", get(api::logout).post(api::logout))
        .route("/generate-playlist", get(api::generate_playlist))
        .route("/create-playlist", post(api::create_playlist))
        .route("/get-songs", get(api::get_songs))
        .route("/stats", get(api::stats))
        .route("/like-song", post(api::like_song))
        .route("/liked-songs", get(api::liked_songs))
        .route("/unlike-song/{id}", delete(api::unlike_song))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(state: AppState) -> Result<()> {
    let addr = SocketAddr::from_str(&state.settings.server_addr)
        .map_err(|e| Error::Config(format!("Failed to parse server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("Cannot bind {addr}: {e}")))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
