use axum::{
    Extension, Json,
    extract::{Query, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    pipeline,
    server::AppState,
    types::{ListeningStats, RecommendedSong},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongsResponse {
    pub songs: Vec<RecommendedSong>,
}

pub async fn get_songs(
    params: std::result::Result<Query<TokenQuery>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> Result<Json<SongsResponse>> {
    let Query(params) = params?;
    let spotify = state.spotify(&params.access_token);
    let songs = pipeline::recommend(&spotify, &state.completion)
        .await
        .inspect_err(|e| warning!("Error fetching recommendations: {}", e))?;
    Ok(Json(SongsResponse { songs }))
}

pub async fn stats(
    params: std::result::Result<Query<TokenQuery>, QueryRejection>,
    Extension(state): Extension<AppState>,
) -> Result<Json<ListeningStats>> {
    let Query(params) = params?;
    let spotify = state.spotify(&params.access_token);
    let stats = pipeline::listening_stats(&spotify)
        .await
        .inspect_err(|e| warning!("Error fetching listening stats: {}", e))?;
    Ok(Json(stats))
}
