use crate::types::{Artist, Paging, PlayHistory, Track, User};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the profile of the user owning the access token.
    ///
    /// The returned id is what playlist creation is scoped to. A 401 here is the
    /// first sign of an expired token, so pipelines call this before anything
    /// that has side effects.
    ///
    /// # API Endpoint
    ///
    /// `GET /me`
    pub async fn current_user(&self) -> Result<User, reqwest::Error> {
        let response = self.get("/me").send().await?.error_for_status()?;
        response.json::<User>().await
    }

    /// Retrieves the user's most listened tracks.
    ///
    /// # Arguments
    ///
    /// * `limit` - Number of tracks to return (1-50)
    ///
    /// # API Endpoint
    ///
    /// `GET /me/top/tracks?limit={limit}`
    pub async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>, reqwest::Error> {
        let response = self
            .get("/me/top/tracks")
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Paging<Track>>().await?.items)
    }

    /// Retrieves the user's most listened artists, genres included.
    ///
    /// # API Endpoint
    ///
    /// `GET /me/top/artists?limit={limit}`
    pub async fn top_artists(&self, limit: u32) -> Result<Vec<Artist>, reqwest::Error> {
        let response = self
            .get("/me/top/artists")
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Paging<Artist>>().await?.items)
    }

    /// Retrieves the tracks the user played most recently, newest first.
    ///
    /// The endpoint wraps each track in a play-history object; only the tracks
    /// are returned.
    ///
    /// # API Endpoint
    ///
    /// `GET /me/player/recently-played?limit={limit}`
    pub async fn recently_played(&self, limit: u32) -> Result<Vec<Track>, reqwest::Error> {
        let response = self
            .get("/me/player/recently-played")
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?;
        let history = response.json::<Paging<PlayHistory>>().await?;
        Ok(history.items.into_iter().map(|item| item.track).collect())
    }
}
