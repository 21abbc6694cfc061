use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
};

use crate::{
    error::Result,
    server::AppState,
    types::{LikedSong, NewLikedSong},
};

/// Stores a liked song. `spotifyId` may be null for songs the catalog never matched.
pub async fn like_song(
    Extension(state): Extension<AppState>,
    payload: std::result::Result<Json<NewLikedSong>, JsonRejection>,
) -> Result<Json<LikedSong>> {
    let Json(song) = payload?;
    Ok(Json(state.likes.like(song).await?))
}

pub async fn liked_songs(Extension(state): Extension<AppState>) -> Json<Vec<LikedSong>> {
    Json(state.likes.list().await)
}

pub async fn unlike_song(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<LikedSong>> {
    Ok(Json(state.likes.unlike(&id).await?))
}
