//! Orchestration over Spotify and the completion endpoint.
//!
//! - [`playlist`] - prompt to finished playlist, with bounded retry on creation
//! - [`recommend`] - listening history to enriched recommendations
//! - [`resolver`] - song/artist text to catalog track
//! - [`stats`] - listening statistics and genre distribution

pub mod playlist;
pub mod recommend;
pub mod resolver;
pub mod stats;

pub use playlist::{RetryPolicy, build_from_prompt, build_from_uris, create_with_retry};
pub use recommend::recommend;
pub use stats::listening_stats;
