use crate::types::{Artist, Track};

pub const PLAYLIST_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that creates Spotify playlists based on a given prompt. Provide a list of 20 songs in JSON format like: [{\"song\": \"Song Name\", \"artist\": \"Artist Name\"}, ...]";

pub const RECOMMENDATION_SYSTEM_INSTRUCTION: &str = "You are a music recommendation assistant. Based on the listener's history, recommend between 20 and 40 songs they have not listed but are likely to enjoy. Respond only with JSON in the format: [{\"name\": \"Song Name\", \"artist\": \"Artist Name\"}, ...]";

pub fn playlist_prompt(prompt: &str) -> String {
    format!("Create a Spotify playlist for: {prompt}")
}

pub fn recommendation_prompt(
    top_tracks: &[Track],
    recent_tracks: &[Track],
    top_artists: &[Artist],
) -> String {
    let describe_tracks = |tracks: &[Track]| {
        tracks
            .iter()
            .map(|t| format!("{} by {}", t.name, t.artist_names()))
            .collect::<Vec<_>>()
            .join("; ")
    };

    let artists = top_artists
        .iter()
        .map(|a| {
            if a.genres.is_empty() {
                a.name.clone()
            } else {
                format!("{} ({})", a.name, a.genres.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "My top tracks are: {}.\nI recently listened to: {}.\nMy favorite artists are: {}.\nRecommend songs I would like.",
        describe_tracks(top_tracks),
        describe_tracks(recent_tracks),
        artists
    )
}
