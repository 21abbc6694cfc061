use std::time::Duration;

use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    info,
    llm::{
        CompletionClient,
        parser::{self, SongListFormat},
        prompts,
    },
    spotify::{SpotifyClient, playlist::MAX_TRACKS_PER_REQUEST},
    success,
    types::{
        CreatePlaylistRequest, GeneratedPlaylist, Playlist, PromptRequest, ResolvedTrack,
        SkipReason, SkippedSong,
    },
    utils, warning,
};

/// Bounded retry applied to playlist creation.
///
/// Only responses with a 5xx status are retried. Any other failure, or running
/// out of attempts, is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Builds a playlist from a free-text prompt.
///
/// 1. Resolves the token owner (401/403 become [`Error::Auth`]).
/// 2. Asks the model for songs and parses them. Nothing is created if this fails.
/// 3. Creates the playlist under `retry`.
/// 4. Resolves and adds songs one by one in the order the model listed them.
///    Songs that cannot be found or added land in the skip list.
pub async fn build_from_prompt(
    spotify: &SpotifyClient,
    completion: &CompletionClient,
    request: &PromptRequest,
    retry: RetryPolicy,
) -> Result<GeneratedPlaylist> {
    let user = spotify.current_user().await.map_err(Error::from_spotify)?;

    info!("Generating playlist for prompt: {}", request.prompt);
    let raw = completion
        .complete(
            prompts::PLAYLIST_SYSTEM_INSTRUCTION,
            &prompts::playlist_prompt(&request.prompt),
        )
        .await?;
    let songs = parser::parse_song_list(&raw, SongListFormat::Playlist)?;

    let name = utils::playlist_name(request);
    let create_request = CreatePlaylistRequest {
        name: name.clone(),
        description: utils::playlist_description(request),
        public: true,
        collaborative: false,
    };
    let playlist = create_with_retry(spotify, &user.id, &create_request, retry).await?;

    let mut added: Vec<ResolvedTrack> = Vec::new();
    let mut skipped: Vec<SkippedSong> = Vec::new();

    for song in songs {
        let track = match super::resolver::resolve_for_playlist(spotify, &song).await {
            Ok(Some(track)) => track,
            Ok(None) => {
                warning!("Track not found: {} by {}", song.title, song.artist);
                skipped.push(SkippedSong {
                    song,
                    reason: SkipReason::NotFound,
                });
                continue;
            }
            Err(e) => {
                warning!("{}", e);
                skipped.push(SkippedSong {
                    song,
                    reason: SkipReason::ResolutionFailed(e.to_string()),
                });
                continue;
            }
        };

        match spotify
            .add_tracks(&playlist.id, vec![track.uri.clone()])
            .await
        {
            Ok(_) => added.push(track),
            Err(e) => {
                warning!(
                    "Failed to add \"{}\" by {} to playlist: {}",
                    song.title,
                    song.artist,
                    e
                );
                skipped.push(SkippedSong {
                    song,
                    reason: SkipReason::AttachFailed(e.to_string()),
                });
            }
        }
    }

    success!(
        "Playlist \"{}\" ready: {} added, {} skipped",
        name,
        added.len(),
        skipped.len()
    );

    Ok(GeneratedPlaylist {
        url: playlist.external_urls.spotify.clone(),
        playlist,
        name,
        added,
        skipped,
    })
}

/// Creates a playlist and fills it with already-resolved track URIs.
///
/// URIs are sent in chunks of [`MAX_TRACKS_PER_REQUEST`]; a chunk that fails to
/// add is logged and skipped.
pub async fn build_from_uris(
    spotify: &SpotifyClient,
    title: &str,
    description: &str,
    uris: &[String],
    retry: RetryPolicy,
) -> Result<Playlist> {
    let user = spotify.current_user().await.map_err(Error::from_spotify)?;

    let create_request = CreatePlaylistRequest {
        name: title.to_string(),
        description: description.to_string(),
        public: true,
        collaborative: false,
    };
    let playlist = create_with_retry(spotify, &user.id, &create_request, retry).await?;

    for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
        if let Err(e) = spotify.add_tracks(&playlist.id, chunk.to_vec()).await {
            warning!("Failed to add tracks to playlist {}: {}", playlist.id, e);
        }
    }

    Ok(playlist)
}

/// Creates a playlist, retrying server-side failures under `retry`.
pub async fn create_with_retry(
    spotify: &SpotifyClient,
    user_id: &str,
    request: &CreatePlaylistRequest,
    retry: RetryPolicy,
) -> Result<Playlist> {
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match spotify.create_playlist(user_id, request).await {
            Ok(playlist) => return Ok(playlist),
            Err(err) => err,
        };

        let status = err.status();
        let retryable = status.is_some_and(|s| s.is_server_error());
        if retryable && attempt < max_attempts {
            warning!(
                "Attempt {} to create playlist failed ({}). Retrying...",
                attempt,
                err
            );
            sleep(retry.delay).await;
            continue; // retry
        }

        return Err(Error::PlaylistCreation {
            attempts: attempt,
            status: status.map(|s| s.as_u16()),
            message: err.to_string(),
        });
    }
}
