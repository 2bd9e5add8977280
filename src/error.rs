use std::{fmt, io};

use reqwest::StatusCode;
use thiserror::Error;

/// Actions guarded against double submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    Push,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Generate => write!(f, "generation"),
            Action::Push => write!(f, "upload"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("another {0} is already in progress")]
    Busy(Action),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Problems detected before any network call is issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please select a playlist first")]
    NoPlaylistSelected,

    #[error("tracks have not been loaded for the selected playlist")]
    TracksNotLoaded,

    #[error("please select at least one track")]
    NoTracksSelected,

    #[error("track {index} does not exist (playlist has {available} tracks)")]
    TrackOutOfRange { index: usize, available: usize },

    #[error("generation method '{0}' is not offered")]
    UnknownMethod(String),

    #[error("no generated image to upload")]
    NoImageToUpload,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not logged in, please run login first")]
    MissingToken,

    #[error("no code verifier stored for this session, please log in again")]
    MissingVerifier,

    #[error("token exchange rejected with status {status}")]
    TokenRejected { status: StatusCode },

    #[error("authorization denied: {0}")]
    Denied(String),

    #[error("random number generator failure: {0}")]
    Rng(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] io::Error),

    #[error("session data error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}
