use axum::{
    Extension, Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    pipeline,
    server::AppState,
    types::PromptRequest,
    warning,
};

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub prompt: String,
    pub access_token: String,
    #[serde(rename = "playlistName")]
    pub playlist_name: Option<String>,
    #[serde(rename = "playlistDescription")]
    pub playlist_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub playlist_url: String,
    pub playlist_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistBody {
    pub access_token: String,
    pub song_uris: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistResponse {
    pub playlist_url: String,
}

pub async fn generate_playlist(
    params: std::result::Result<Query<GenerateQuery>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> Result<Json<GenerateResponse>> {
    let Query(params) = params?;
    if params.prompt.trim().is_empty() {
        return Err(Error::BadRequest("prompt must not be empty".into()));
    }

    let request = PromptRequest {
        prompt: params.prompt,
        playlist_name: params.playlist_name,
        playlist_description: params.playlist_description,
    };
    let spotify = state.spotify(&params.access_token);

    let generated =
        pipeline::build_from_prompt(&spotify, &state.completion, &request, state.retry)
            .await
            .inspect_err(|e| warning!("Error generating playlist: {}", e))?;

    Ok(Json(GenerateResponse {
        playlist_url: generated.url,
        playlist_name: generated.name,
    }))
}

pub async fn create_playlist(
    Extension(state): Extension<AppState>,
    body: std::result::Result<Json<CreatePlaylistBody>, JsonRejection>,
) -> Result<Json<CreatePlaylistResponse>> {
    let Json(body) = body?;
    if body.title.trim().is_empty() {
        return Err(Error::BadRequest("title must not be empty".into()));
    }
    if body.song_uris.is_empty() {
        return Err(Error::BadRequest("songUris must not be empty".into()));
    }

    let spotify = state.spotify(&body.access_token);
    let playlist = pipeline::build_from_uris(
        &spotify,
        &body.title,
        &body.description,
        &body.song_uris,
        state.retry,
    )
    .await
    .inspect_err(|e| warning!("Error creating playlist: {}", e))?;

    Ok(Json(CreatePlaylistResponse {
        playlist_url: playlist.external_urls.spotify,
    }))
}
