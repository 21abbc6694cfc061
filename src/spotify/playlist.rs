use crate::types::{
    AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest, Playlist,
};

use super::SpotifyClient;

/// Maximum number of URIs Spotify accepts in one add-tracks call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Creates a playlist owned by `user_id`.
    ///
    /// Makes exactly one attempt. Retrying is the caller's decision; the HTTP
    /// status of a failed attempt is available through `reqwest::Error::status`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Spotify id of the owner, as returned by [`SpotifyClient::current_user`]
    /// * `request` - Name, description and visibility of the new playlist
    ///
    /// # API Endpoint
    ///
    /// `POST /users/{user_id}/playlists`
    pub async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, reqwest::Error> {
        let response = self
            .post(&format!("/users/{user_id}/playlists"))
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        response.json::<Playlist>().await
    }

    /// Appends tracks to the end of a playlist.
    ///
    /// At most [`MAX_TRACKS_PER_REQUEST`] URIs may be sent per call; callers
    /// chunk longer lists.
    ///
    /// # API Endpoint
    ///
    /// `POST /playlists/{playlist_id}/tracks`
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> Result<AddTrackToPlaylistResponse, reqwest::Error> {
        let response = self
            .post(&format!("/playlists/{playlist_id}/tracks"))
            .json(&AddTrackToPlaylistRequest { uris })
            .send()
            .await?
            .error_for_status()?;
        response.json::<AddTrackToPlaylistResponse>().await
    }
}
