use crate::{
    error::{Error, Result},
    spotify::SpotifyClient,
    types::{RecommendedSong, ResolvedTrack, SongReference},
    utils, warning,
};

/// Looks a song up with a field-filtered search and takes the first hit.
///
/// `Ok(None)` means the search worked and found nothing. A failing search is
/// reported as [`Error::TrackResolution`] so the caller can skip the song.
pub async fn resolve_for_playlist(
    spotify: &SpotifyClient,
    song: &SongReference,
) -> Result<Option<ResolvedTrack>> {
    let query = utils::playlist_search_query(song);
    let tracks = spotify
        .search_tracks(&query, None)
        .await
        .map_err(|e| Error::TrackResolution {
            title: song.title.clone(),
            artist: song.artist.clone(),
            message: e.to_string(),
        })?;

    Ok(tracks.iter().find_map(ResolvedTrack::from_track))
}

/// Looks a song up and decorates the hit with playability, preview and genres.
///
/// Never fails: a miss or a failed search yields the unresolved entry, and a
/// failed detail or artist lookup leaves only that lookup's fields empty.
pub async fn resolve_enriched(spotify: &SpotifyClient, song: &SongReference) -> RecommendedSong {
    let query = utils::plain_search_query(song);
    let hit = match spotify.search_tracks(&query, Some(1)).await {
        Ok(tracks) => tracks.into_iter().next(),
        Err(e) => {
            warning!(
                "Search failed for \"{}\" by {}: {}",
                song.title,
                song.artist,
                e
            );
            None
        }
    };

    let Some((track, mut resolved)) =
        hit.and_then(|track| ResolvedTrack::from_track(&track).map(|resolved| (track, resolved)))
    else {
        return RecommendedSong::unresolved(song);
    };

    // search hits carry no market data, playability comes from the detail lookup
    resolved.is_playable = false;
    resolved.preview_url = None;

    let artist_id = track.primary_artist_id().map(str::to_string);
    let artist_lookup = async {
        match artist_id {
            Some(id) => Some(spotify.artist(&id).await),
            None => None,
        }
    };
    let (detail, artist) = tokio::join!(spotify.track(&resolved.external_id), artist_lookup);

    match detail {
        Ok(detail) => {
            resolved.is_playable = detail.is_playable.unwrap_or(false);
            resolved.preview_url = detail.preview_url;
        }
        Err(e) => warning!("Track details unavailable for {}: {}", resolved.external_id, e),
    }

    match artist {
        Some(Ok(artist)) => resolved.genres = artist.genres,
        Some(Err(e)) => warning!("Artist genres unavailable for {}: {}", resolved.external_id, e),
        None => {}
    }

    RecommendedSong::resolved(song, resolved)
}
