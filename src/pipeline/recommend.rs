use futures::{StreamExt, stream};

use crate::{
    error::{Error, Result},
    info,
    llm::{
        CompletionClient,
        parser::{self, SongListFormat},
        prompts,
    },
    spotify::SpotifyClient,
    types::RecommendedSong,
};

use super::resolver;

pub const TOP_TRACKS_LIMIT: u32 = 10;
pub const RECENT_TRACKS_LIMIT: u32 = 10;
pub const TOP_ARTISTS_LIMIT: u32 = 5;

/// Songs resolved at the same time while enriching recommendations.
pub const RESOLVE_CONCURRENCY: usize = 5;

/// Recommends songs from the user's listening history.
///
/// Every song the model names is returned, in the model's order. Songs that
/// could not be found in the catalog keep their name and artist with empty
/// cover, link and genres. No playlist is created.
pub async fn recommend(
    spotify: &SpotifyClient,
    completion: &CompletionClient,
) -> Result<Vec<RecommendedSong>> {
    let (top_tracks, recent_tracks, top_artists) = tokio::try_join!(
        spotify.top_tracks(TOP_TRACKS_LIMIT),
        spotify.recently_played(RECENT_TRACKS_LIMIT),
        spotify.top_artists(TOP_ARTISTS_LIMIT),
    )
    .map_err(Error::from_spotify)?;

    let prompt = prompts::recommendation_prompt(&top_tracks, &recent_tracks, &top_artists);
    let raw = completion
        .complete(prompts::RECOMMENDATION_SYSTEM_INSTRUCTION, &prompt)
        .await?;
    let songs = parser::parse_song_list(&raw, SongListFormat::Recommendation)?;
    info!("Model recommended {} songs, resolving...", songs.len());

    let recommendations: Vec<RecommendedSong> = stream::iter(songs)
        .map(|song| async move { resolver::resolve_enriched(spotify, &song).await })
        .buffered(RESOLVE_CONCURRENCY)
        .collect()
        .await;

    Ok(recommendations)
}
