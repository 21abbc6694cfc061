#![allow(dead_code)]

//! Fake Spotify and chat-completion upstream served on an ephemeral port.

use std::{
    collections::{HashMap, VecDeque},
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use moodlist::{
    config::{CompletionSettings, Settings, SpotifySettings},
    llm::CompletionClient,
    management::LikedSongStore,
    pipeline::RetryPolicy,
    server::{self, AppState},
    spotify::SpotifyClient,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "test-access-token";

#[derive(Debug, Clone)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub artist_id: String,
}

#[derive(Default)]
pub struct Upstream {
    /// Reply content of the chat completion; `None` answers 500.
    pub completion: Option<String>,
    pub catalog: Vec<CatalogTrack>,
    pub genres: HashMap<String, Vec<String>>,
    /// Titles whose search answers 500.
    pub failing_searches: Vec<String>,
    /// Track ids whose detail lookup answers 500.
    pub failing_details: Vec<String>,
    /// Artist ids whose lookup answers 500.
    pub failing_artists: Vec<String>,
    /// URIs the add-tracks call refuses.
    pub failing_adds: Vec<String>,
    /// Status of `/me`; anything but 200 is an error.
    pub me_status: Option<u16>,
    /// Statuses answered by playlist creation before it succeeds.
    pub create_failures: VecDeque<u16>,
    /// Status of the history endpoints; anything but 200 is an error.
    pub history_status: Option<u16>,
    pub top_tracks: Vec<String>,
    pub recent_tracks: Vec<String>,
    pub top_artists: Vec<String>,
    /// Local files listed at the front of top and recent tracks.
    pub local_tracks: Vec<CatalogTrack>,

    // recorded
    pub create_attempts: u32,
    pub created_names: Vec<String>,
    pub added_uris: Vec<String>,
    pub add_calls: u32,
    pub completion_calls: u32,
    pub bearer_tokens: Vec<String>,
}

pub type SharedUpstream = Arc<Mutex<Upstream>>;

impl Upstream {
    pub fn with_track(mut self, id: &str, name: &str, artist: &str) -> Self {
        self.catalog.push(CatalogTrack {
            id: id.to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
            artist_id: format!("{id}-artist"),
        });
        self
    }

    pub fn with_genres(mut self, track_id: &str, genres: &[&str]) -> Self {
        self.genres.insert(
            format!("{track_id}-artist"),
            genres.iter().map(|g| g.to_string()).collect(),
        );
        self
    }

    pub fn with_local_track(mut self, name: &str, artist: &str) -> Self {
        self.local_tracks.push(CatalogTrack {
            id: String::new(),
            name: name.to_string(),
            artist: artist.to_string(),
            artist_id: String::new(),
        });
        self
    }

    pub fn with_completion(mut self, content: &str) -> Self {
        self.completion = Some(content.to_string());
        self
    }
}

pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{id}")
}

fn track_json(track: &CatalogTrack, detailed: bool) -> Value {
    let mut value = json!({
        "id": track.id,
        "name": track.name,
        "uri": track_uri(&track.id),
        "artists": [{ "id": track.artist_id, "name": track.artist }],
        "album": {
            "name": format!("{} album", track.name),
            "images": [{ "url": format!("https://img.test/{}.jpg", track.id), "height": 640, "width": 640 }]
        },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", track.id) },
    });
    if detailed {
        value["is_playable"] = json!(true);
        value["preview_url"] = json!(format!("https://p.scdn.test/{}.mp3", track.id));
    }
    value
}

fn local_track_json(track: &CatalogTrack) -> Value {
    json!({
        "id": null,
        "name": track.name,
        "uri": format!("spotify:local:{}:{}", track.artist, track.name),
        "artists": [{ "id": null, "name": track.artist }],
        "album": { "name": "Local Files", "images": [] },
        "external_urls": {},
        "is_local": true,
    })
}

fn artist_json(upstream: &Upstream, artist_id: &str) -> Option<Value> {
    let track = upstream.catalog.iter().find(|t| t.artist_id == artist_id)?;
    Some(json!({
        "id": artist_id,
        "name": track.artist,
        "genres": upstream.genres.get(artist_id).cloned().unwrap_or_default(),
        "images": [{ "url": format!("https://img.test/{artist_id}.jpg"), "height": 320, "width": 320 }],
    }))
}

fn status(code: u16, message: &str) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": { "status": code, "message": message } }))).into_response()
}

fn record_bearer(upstream: &mut Upstream, headers: &HeaderMap) {
    if let Some(token) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        upstream.bearer_tokens.push(token.to_string());
    }
}

async fn me(State(upstream): State<SharedUpstream>, headers: HeaderMap) -> Response {
    let mut upstream = upstream.lock().unwrap();
    record_bearer(&mut upstream, &headers);
    match upstream.me_status {
        Some(code) if code != 200 => status(code, "me failed"),
        _ => Json(json!({ "id": "user-1", "display_name": "Test Listener" })).into_response(),
    }
}

async fn search(
    State(upstream): State<SharedUpstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut upstream = upstream.lock().unwrap();
    record_bearer(&mut upstream, &headers);
    let q = params.get("q").cloned().unwrap_or_default();

    if upstream.failing_searches.iter().any(|t| q.contains(t.as_str())) {
        return status(500, "search failed");
    }

    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(20);
    let items: Vec<Value> = upstream
        .catalog
        .iter()
        .filter(|t| q.contains(t.name.as_str()) && q.contains(t.artist.as_str()))
        .take(limit)
        .map(|t| track_json(t, false))
        .collect();
    Json(json!({ "tracks": { "items": items } })).into_response()
}

async fn track(State(upstream): State<SharedUpstream>, Path(id): Path<String>) -> Response {
    let upstream = upstream.lock().unwrap();
    if upstream.failing_details.contains(&id) {
        return status(500, "detail failed");
    }
    match upstream.catalog.iter().find(|t| t.id == id) {
        Some(t) => Json(track_json(t, true)).into_response(),
        None => status(404, "no such track"),
    }
}

async fn artist(State(upstream): State<SharedUpstream>, Path(id): Path<String>) -> Response {
    let upstream = upstream.lock().unwrap();
    if upstream.failing_artists.contains(&id) {
        return status(500, "artist failed");
    }
    match artist_json(&upstream, &id) {
        Some(artist) => Json(artist).into_response(),
        None => status(404, "no such artist"),
    }
}

fn tracks_by_id(upstream: &Upstream, ids: &[String]) -> Vec<Value> {
    let local = upstream.local_tracks.iter().map(local_track_json);
    let catalog = ids
        .iter()
        .filter_map(|id| upstream.catalog.iter().find(|t| &t.id == id))
        .map(|t| track_json(t, false));
    local.chain(catalog).collect()
}

fn history_failure(upstream: &Upstream) -> Option<Response> {
    match upstream.history_status {
        Some(code) if code != 200 => Some(status(code, "history failed")),
        _ => None,
    }
}

async fn top_tracks(State(upstream): State<SharedUpstream>) -> Response {
    let upstream = upstream.lock().unwrap();
    if let Some(failure) = history_failure(&upstream) {
        return failure;
    }
    Json(json!({ "items": tracks_by_id(&upstream, &upstream.top_tracks) })).into_response()
}

async fn top_artists(State(upstream): State<SharedUpstream>) -> Response {
    let upstream = upstream.lock().unwrap();
    if let Some(failure) = history_failure(&upstream) {
        return failure;
    }
    let items: Vec<Value> = upstream
        .top_artists
        .iter()
        .filter_map(|id| artist_json(&upstream, id))
        .collect();
    Json(json!({ "items": items })).into_response()
}

async fn recently_played(State(upstream): State<SharedUpstream>) -> Response {
    let upstream = upstream.lock().unwrap();
    if let Some(failure) = history_failure(&upstream) {
        return failure;
    }
    let items: Vec<Value> = tracks_by_id(&upstream, &upstream.recent_tracks)
        .into_iter()
        .map(|track| json!({ "track": track, "played_at": "2026-10-01T08:00:00Z" }))
        .collect();
    Json(json!({ "items": items })).into_response()
}

async fn create_playlist(
    State(upstream): State<SharedUpstream>,
    Path(_user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut upstream = upstream.lock().unwrap();
    upstream.create_attempts += 1;
    if let Some(code) = upstream.create_failures.pop_front() {
        return status(code, "create failed");
    }

    let name = body["name"].as_str().unwrap_or_default().to_string();
    upstream.created_names.push(name.clone());
    let id = format!("pl-{}", upstream.created_names.len());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": name,
            "description": body["description"],
            "external_urls": { "spotify": format!("https://open.spotify.com/playlist/{id}") },
        })),
    )
        .into_response()
}

async fn add_tracks(
    State(upstream): State<SharedUpstream>,
    Path(_playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut upstream = upstream.lock().unwrap();
    upstream.add_calls += 1;
    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|a| a.iter().filter_map(|u| u.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    if uris.iter().any(|u| upstream.failing_adds.contains(u)) {
        return status(500, "add failed");
    }
    upstream.added_uris.extend(uris);
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" }))).into_response()
}

async fn chat_completions(State(upstream): State<SharedUpstream>) -> Response {
    let mut upstream = upstream.lock().unwrap();
    upstream.completion_calls += 1;
    match &upstream.completion {
        Some(content) => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }))
        .into_response(),
        None => status(500, "model unavailable"),
    }
}

/// Serves the fake upstream and returns its base URL.
pub async fn start_upstream(upstream: Upstream) -> (String, SharedUpstream) {
    let shared: SharedUpstream = Arc::new(Mutex::new(upstream));
    let app = Router::new()
        .route("/me", get(me))
        .route("/search", get(search))
        .route("/tracks/{id}", get(track))
        .route("/artists/{id}", get(artist))
        .route("/me/top/tracks", get(top_tracks))
        .route("/me/top/artists", get(top_artists))
        .route("/me/player/recently-played", get(recently_played))
        .route("/users/{user_id}/playlists", post(create_playlist))
        .route("/playlists/{playlist_id}/tracks", post(add_tracks))
        .route("/chat/completions", post(chat_completions))
        .with_state(shared.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), shared)
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        delay: Duration::from_millis(10),
    }
}

pub fn settings(base_url: &str, liked_songs_path: PathBuf) -> Settings {
    Settings {
        server_addr: "127.0.0.1:0".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
        spotify: SpotifySettings {
            api_url: base_url.to_string(),
            auth_url: format!("{base_url}/authorize"),
            token_url: format!("{base_url}/api/token"),
            client_id: "client-id".to_string(),
            redirect_uri: "http://127.0.0.1:3001/callback".to_string(),
            scope: "user-read-private".to_string(),
        },
        completion: CompletionSettings {
            api_url: base_url.to_string(),
            api_key: "sk-test".to_string(),
            model: "test-model".to_string(),
        },
        liked_songs_path,
    }
}

pub fn clients(base_url: &str) -> (SpotifyClient, CompletionClient) {
    let http = reqwest::Client::new();
    let spotify = SpotifyClient::new(http.clone(), base_url, TEST_TOKEN);
    let completion = CompletionClient::new(
        http,
        &CompletionSettings {
            api_url: base_url.to_string(),
            api_key: "sk-test".to_string(),
            model: "test-model".to_string(),
        },
    );
    (spotify, completion)
}

/// Serves the moodlist router against `base_url` and returns the app's URL.
pub async fn start_app(base_url: &str, liked_songs_path: PathBuf) -> String {
    let likes = LikedSongStore::open(liked_songs_path.clone()).await.unwrap();
    let state =
        AppState::new(settings(base_url, liked_songs_path), likes).with_retry(fast_retry());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });
    format!("http://{addr}")
}
