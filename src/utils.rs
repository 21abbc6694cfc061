use std::{cmp::Ordering, collections::HashMap};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Artist, GenreCount, PromptRequest, SongReference};

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    random_alphanumeric(16)
}

/// Field-filtered query used when building a playlist from a prompt.
pub fn playlist_search_query(song: &SongReference) -> String {
    format!("track:{} artist:{}", song.title, song.artist)
}

/// Plain-text query used when enriching recommendations.
pub fn plain_search_query(song: &SongReference) -> String {
    format!("{} {}", song.title, song.artist)
}

/// Name of a generated playlist: the explicit name, or the prompt itself.
pub fn playlist_name(request: &PromptRequest) -> String {
    match request.playlist_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => request.prompt.trim().to_string(),
    }
}

pub fn playlist_description(request: &PromptRequest) -> String {
    match request.playlist_description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => format!("Generated from the prompt \"{}\"", request.prompt.trim()),
    }
}

/// Counts genres across artists, most frequent first, ties by name.
pub fn genre_distribution(artists: &[Artist]) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        *counts.entry(genre.as_str()).or_insert(0) += 1;
    }

    let mut distribution: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();

    distribution.sort_by(|a, b| match b.count.cmp(&a.count) {
        Ordering::Equal => a.genre.cmp(&b.genre), // secondary sort: name ascending
        other => other,
    });
    distribution
}
