use crate::{
    error::{Error, Result},
    spotify::SpotifyClient,
    types::{Artist, ArtistSummary, ListeningStats, Track, TrackSummary},
    utils,
};

pub const RECENT_TRACKS_LIMIT: u32 = 24;
pub const TOP_TRACKS_LIMIT: u32 = 50;
pub const TOP_ARTISTS_LIMIT: u32 = 50;

/// Collects recent plays, favourites and the genre spread of favourite artists.
pub async fn listening_stats(spotify: &SpotifyClient) -> Result<ListeningStats> {
    let (recent, top_tracks, top_artists) = tokio::try_join!(
        spotify.recently_played(RECENT_TRACKS_LIMIT),
        spotify.top_tracks(TOP_TRACKS_LIMIT),
        spotify.top_artists(TOP_ARTISTS_LIMIT),
    )
    .map_err(Error::from_spotify)?;

    Ok(ListeningStats {
        recent_tracks: summarize_tracks(&recent),
        top_tracks: summarize_tracks(&top_tracks),
        genres: utils::genre_distribution(&top_artists),
        top_artists: summarize_artists(&top_artists),
    })
}

// local files and entries without a name or an image are not shown
fn summarize_tracks(tracks: &[Track]) -> Vec<TrackSummary> {
    tracks
        .iter()
        .filter(|t| t.id.is_some() && !t.name.is_empty())
        .filter_map(|t| {
            t.cover_url().map(|cover| TrackSummary {
                name: t.name.clone(),
                artists: t.artist_names(),
                cover: cover.to_string(),
            })
        })
        .collect()
}

fn summarize_artists(artists: &[Artist]) -> Vec<ArtistSummary> {
    artists
        .iter()
        .filter(|a| !a.name.is_empty())
        .filter_map(|a| {
            a.images.first().map(|image| ArtistSummary {
                name: a.name.clone(),
                genres: a.genres.clone(),
                image: image.url.clone(),
            })
        })
        .collect()
}
