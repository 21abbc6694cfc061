use tabled::Table;

use crate::{
    config, error, management::LikedSongStore, success, types::LikedSongTableRow, warning,
};

pub async fn liked(unlike: Option<String>) {
    let store = match LikedSongStore::open(config::liked_songs_path()).await {
        Ok(store) => store,
        Err(e) => error!("Cannot open liked songs store: {}", e),
    };

    if let Some(id) = unlike {
        match store.unlike(&id).await {
            Ok(song) => success!("Removed \"{}\" by {}", song.name, song.artist),
            Err(e) => error!("{}", e),
        }
        return;
    }

    let songs = store.list().await;
    if songs.is_empty() {
        warning!("No liked songs yet.");
        return;
    }

    let rows: Vec<LikedSongTableRow> = songs
        .into_iter()
        .map(|s| LikedSongTableRow {
            id: s.id,
            name: s.name,
            artist: s.artist,
        })
        .collect();
    println!("{}", Table::new(rows));
}
