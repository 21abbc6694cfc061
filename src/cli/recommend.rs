use tabled::Table;

use crate::{error, pipeline, success, types::RecommendationTableRow};

pub async fn recommend(token: Option<String>) {
    let state = super::load_state().await;
    let spotify = super::spotify_client(&state, token).await;

    let pb = super::spinner("Asking for recommendations...");
    let result = pipeline::recommend(&spotify, &state.completion).await;
    pb.finish_and_clear();

    let songs = match result {
        Ok(songs) => songs,
        Err(e) => error!("Failed to fetch recommendations: {}", e),
    };

    let found = songs.iter().filter(|s| s.is_resolved()).count();
    let rows: Vec<RecommendationTableRow> = songs
        .into_iter()
        .map(|s| RecommendationTableRow {
            name: s.name,
            artist: s.artist,
            genres: s
                .genres
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
            link: if s.external_url.is_empty() {
                "-".to_string()
            } else {
                s.external_url
            },
        })
        .collect();

    let total = rows.len();
    println!("{}", Table::new(rows));
    success!("{} of {} recommendations found on Spotify", found, total);
}
