//! moodlist library
//!
//! This library turns natural-language prompts into Spotify playlists through a
//! single chat-completion call, recommends songs from a listener's history, and
//! keeps a list of liked songs. It includes modules for the HTTP backend, the
//! Spotify and completion clients, the orchestration pipelines, and a small CLI.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served by the backend
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every layer
//! - `llm` - Completion client, prompt templates and song list parser
//! - `management` - Liked-song store and cached CLI token
//! - `pipeline` - Playlist generation, recommendations and listening stats
//! - `server` - Router and shared application state
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use moodlist::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> moodlist::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let state = server::AppState::from_settings(settings).await?;
//!     server::start_api_server(state).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use moodlist::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Writes one log line: local time, a colored marker, then the message.
///
/// Shared by [`info!`], [`success!`], [`warning!`] and [`error!`]. Informational
/// lines go to stdout, problems to stderr, so server output can be split by
/// stream.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
  (stdout, $marker:expr, $($arg:tt)*) => ({
    println!(
      "{} [{}] {}",
      chrono::Local::now().format("%H:%M:%S"),
      $marker,
      std::format_args!($($arg)*)
    );
  });
  (stderr, $marker:expr, $($arg:tt)*) => ({
    eprintln!(
      "{} [{}] {}",
      chrono::Local::now().format("%H:%M:%S"),
      $marker,
      std::format_args!($($arg)*)
    );
  });
}

/// Logs progress with a blue "o" marker.
///
/// ```
/// info!("Generating playlist for prompt: {}", prompt);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__log_line!(stdout, "o".blue().bold(), $($arg)*);
  })
}

/// Logs a completed operation with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__log_line!(stdout, "✓".green().bold(), $($arg)*);
  })
}

/// Logs a recoverable problem with a yellow "!" marker.
///
/// Used for everything a request survives: skipped songs, failed enrichment
/// lookups, retried playlist creation.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__log_line!(stderr, "!".yellow().bold(), $($arg)*);
  })
}

/// Logs a fatal error with a red "!" marker and exits with status 1.
///
/// Only for command-line startup failures. Request handlers return
/// [`Error`] values instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    $crate::__log_line!(stderr, "!".red().bold(), $($arg)*);
    std::process::exit(1);
  })
}
