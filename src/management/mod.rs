mod auth;
mod liked;

pub use auth::TokenManager;
pub use liked::LikedSongStore;
