use crate::types::{Artist, SearchResponse, Track};

use super::SpotifyClient;

impl SpotifyClient {
    /// Searches the catalog for tracks matching a free-form query.
    ///
    /// The query may use Spotify's field filters (`track:`, `artist:`) or be
    /// plain text; it is sent as-is and URL-encoded by the HTTP layer.
    ///
    /// # Arguments
    ///
    /// * `query` - Search expression
    /// * `limit` - Optional cap on returned tracks; Spotify defaults to 20
    ///
    /// # Returns
    ///
    /// The matching tracks in Spotify's relevance order. An empty vector means
    /// nothing matched; it is not an error.
    ///
    /// # API Endpoint
    ///
    /// `GET /search?q={query}&type=track[&limit={limit}]`
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Track>, reqwest::Error> {
        let mut request = self.get("/search").query(&[("q", query), ("type", "track")]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<SearchResponse>().await?.tracks.items)
    }

    /// Retrieves the full track record.
    ///
    /// Uses `market=from_token` so Spotify fills in `is_playable` for the
    /// caller's country.
    ///
    /// # API Endpoint
    ///
    /// `GET /tracks/{id}?market=from_token`
    pub async fn track(&self, id: &str) -> Result<Track, reqwest::Error> {
        let response = self
            .get(&format!("/tracks/{id}"))
            .query(&[("market", "from_token")])
            .send()
            .await?
            .error_for_status()?;
        response.json::<Track>().await
    }

    /// Retrieves an artist, including the genres Spotify associates with it.
    ///
    /// # API Endpoint
    ///
    /// `GET /artists/{id}`
    pub async fn artist(&self, id: &str) -> Result<Artist, reqwest::Error> {
        let response = self
            .get(&format!("/artists/{id}"))
            .send()
            .await?
            .error_for_status()?;
        response.json::<Artist>().await
    }
}
