//! Error taxonomy shared by the pipelines, the store and the HTTP surface.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while serving a request or running a pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The access token was rejected by Spotify (invalid or expired).
    #[error("Spotify rejected the access token: {0}")]
    Auth(String),

    /// The chat-completion call failed or returned nothing usable.
    #[error("Completion request failed: {0}")]
    UpstreamModel(String),

    /// The completion text could not be read as a song list.
    #[error("Completion is not a valid song list: {0}")]
    MalformedCompletion(String),

    #[error("Playlist creation failed after {attempts} attempt(s): {message}")]
    PlaylistCreation {
        attempts: u32,
        status: Option<u16>,
        message: String,
    },

    /// A single song could not be looked up. Never fatal to a pipeline.
    #[error("Could not resolve \"{title}\" by {artist}: {message}")]
    TrackResolution {
        title: String,
        artist: String,
        message: String,
    },

    #[error("Spotify request failed: {0}")]
    Spotify(#[from] reqwest::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps a failed Spotify call to `Auth` when the token was refused.
    pub fn from_spotify(err: reqwest::Error) -> Self {
        match err.status() {
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => {
                Error::Auth(err.to_string())
            }
            _ => Error::Spotify(err),
        }
    }

    /// True for failures of the completion step: the call itself or its output.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Error::UpstreamModel(_) | Error::MalformedCompletion(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Auth(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}
