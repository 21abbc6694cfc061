use tabled::Table;

use crate::{
    error, info, pipeline,
    types::{GenreTableRow, TrackSummary, TrackTableRow},
};

const GENRES_SHOWN: usize = 15;

pub async fn stats(token: Option<String>) {
    let state = super::load_state().await;
    let spotify = super::spotify_client(&state, token).await;

    let pb = super::spinner("Fetching listening statistics...");
    let result = pipeline::listening_stats(&spotify).await;
    pb.finish_and_clear();

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => error!("Failed to fetch statistics: {}", e),
    };

    info!("Recently played");
    println!("{}", Table::new(track_rows(&stats.recent_tracks)));

    info!("Top tracks");
    println!("{}", Table::new(track_rows(&stats.top_tracks)));

    info!("Genre distribution of top artists");
    let genres: Vec<GenreTableRow> = stats
        .genres
        .into_iter()
        .take(GENRES_SHOWN)
        .map(|g| GenreTableRow {
            genre: g.genre,
            count: g.count,
        })
        .collect();
    println!("{}", Table::new(genres));
}

fn track_rows(tracks: &[TrackSummary]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: t.artists.clone(),
        })
        .collect()
}
