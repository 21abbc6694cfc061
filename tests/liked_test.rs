use moodlist::Error;
use moodlist::management::LikedSongStore;
use moodlist::types::NewLikedSong;
use tempfile::TempDir;

fn track_uri(id: &str) -> String {
    format!("spotify:track:{id}")
}

fn new_song(spotify_id: &str, name: &str) -> NewLikedSong {
    NewLikedSong {
        spotify_id: Some(track_uri(spotify_id)),
        name: name.to_string(),
        artist: "Survivor".to_string(),
        cover: "https://img.test/cover.jpg".to_string(),
    }
}

#[tokio::test]
async fn test_missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = LikedSongStore::open(dir.path().join("liked.json")).await.unwrap();

    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn test_like_assigns_id_and_timestamp() {
    let dir = TempDir::new().unwrap();
    let store = LikedSongStore::open(dir.path().join("liked.json")).await.unwrap();

    let first = store.like(new_song("tiger", "Eye of the Tiger")).await.unwrap();
    let second = store.like(new_song("tiger", "Eye of the Tiger")).await.unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    assert!(first.liked_at > 0);
    assert_eq!(first.spotify_id.as_deref(), Some("spotify:track:tiger"));

    // duplicates are kept, in insertion order
    let listed = store.list().await;
    assert_eq!(listed, vec![first, second]);
}

#[tokio::test]
async fn test_likes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("liked.json");

    let liked = {
        let store = LikedSongStore::open(&path).await.unwrap();
        store.like(new_song("tiger", "Eye of the Tiger")).await.unwrap()
    };

    let reopened = LikedSongStore::open(&path).await.unwrap();
    assert_eq!(reopened.list().await, vec![liked]);
}

#[tokio::test]
async fn test_unlike_removes_song() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("liked.json");
    let store = LikedSongStore::open(&path).await.unwrap();

    let keep = store.like(new_song("a", "Song A")).await.unwrap();
    let drop = store.like(new_song("b", "Song B")).await.unwrap();

    let removed = store.unlike(&drop.id).await.unwrap();
    assert_eq!(removed, drop);
    assert_eq!(store.list().await, vec![keep.clone()]);

    let reopened = LikedSongStore::open(&path).await.unwrap();
    assert_eq!(reopened.list().await, vec![keep]);
}

#[tokio::test]
async fn test_unlike_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = LikedSongStore::open(dir.path().join("liked.json")).await.unwrap();
    store.like(new_song("a", "Song A")).await.unwrap();

    let err = store.unlike("does-not-exist").await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(store.list().await.len(), 1);
}

#[tokio::test]
async fn test_corrupt_file_is_store_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("liked.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = LikedSongStore::open(&path).await.err().unwrap();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn test_liked_song_serializes_camel_case() {
    let dir = TempDir::new().unwrap();
    let store = LikedSongStore::open(dir.path().join("liked.json")).await.unwrap();
    let liked = store.like(new_song("tiger", "Eye of the Tiger")).await.unwrap();

    let value = serde_json::to_value(&liked).unwrap();
    assert_eq!(value["spotifyId"], "spotify:track:tiger");
    assert!(value["likedAt"].is_i64());
}

#[tokio::test]
async fn test_like_song_without_catalog_match() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("liked.json");
    let store = LikedSongStore::open(&path).await.unwrap();

    let liked = store
        .like(NewLikedSong {
            spotify_id: None,
            name: "Song B".to_string(),
            artist: "Artist B".to_string(),
            cover: String::new(),
        })
        .await
        .unwrap();
    assert!(liked.spotify_id.is_none());

    let reopened = LikedSongStore::open(&path).await.unwrap();
    assert_eq!(reopened.list().await, vec![liked]);
}
