use moodlist::types::{Artist, PromptRequest, SongReference};
use moodlist::utils::*;

// Helper function to create a test artist
fn create_test_artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("{}_name", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        images: vec![],
    }
}

fn create_test_request(prompt: &str, name: Option<&str>, description: Option<&str>) -> PromptRequest {
    PromptRequest {
        prompt: prompt.to_string(),
        playlist_name: name.map(str::to_string),
        playlist_description: description.map(str::to_string),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest, base64url without padding
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 16);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_search_queries() {
    let song = SongReference {
        title: "Eye of the Tiger".to_string(),
        artist: "Survivor".to_string(),
    };

    assert_eq!(
        playlist_search_query(&song),
        "track:Eye of the Tiger artist:Survivor"
    );
    assert_eq!(plain_search_query(&song), "Eye of the Tiger Survivor");
}

#[test]
fn test_playlist_name_defaults_to_prompt() {
    let request = create_test_request("  upbeat running music ", None, None);
    assert_eq!(playlist_name(&request), "upbeat running music");

    let blank = create_test_request("upbeat running music", Some("   "), None);
    assert_eq!(playlist_name(&blank), "upbeat running music");
}

#[test]
fn test_playlist_name_explicit() {
    let request = create_test_request("upbeat running music", Some("Morning Run"), None);
    assert_eq!(playlist_name(&request), "Morning Run");
}

#[test]
fn test_playlist_description() {
    let default = create_test_request("rainy sunday", None, None);
    assert_eq!(
        playlist_description(&default),
        "Generated from the prompt \"rainy sunday\""
    );

    let explicit = create_test_request("rainy sunday", None, Some("For the couch"));
    assert_eq!(playlist_description(&explicit), "For the couch");
}

#[test]
fn test_genre_distribution_sorted_by_count_then_name() {
    let artists = vec![
        create_test_artist("a1", &["rock", "indie"]),
        create_test_artist("a2", &["pop", "indie"]),
        create_test_artist("a3", &["rock", "indie", "alt"]),
    ];

    let distribution = genre_distribution(&artists);
    let pairs: Vec<(&str, usize)> = distribution
        .iter()
        .map(|g| (g.genre.as_str(), g.count))
        .collect();

    assert_eq!(
        pairs,
        vec![("indie", 3), ("rock", 2), ("alt", 1), ("pop", 1)]
    );
}

#[test]
fn test_genre_distribution_empty() {
    assert!(genre_distribution(&[]).is_empty());
    assert!(genre_distribution(&[create_test_artist("a1", &[])]).is_empty());
}
