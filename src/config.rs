//! Configuration management for the playlist cover client.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client id)
//!
//! The resolved values are collected into [`Config`] so components receive
//! their endpoints explicitly instead of reading the environment themselves.

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_SCOPE: &str = "ugc-image-upload playlist-modify-public playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_THUMBNAIL_METHODS: &str = "track_thumbnails,titles_artists";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub backend_url: String,
    pub server_addr: String,
    pub thumbnail_methods: Vec<String>,
}

impl Config {
    /// Builds the configuration from the current environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `SPOTIFY_CLIENT_ID` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: spotify_client_id()?,
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            auth_url: spotify_auth_url(),
            token_url: spotify_token_url(),
            api_url: spotify_api_url(),
            backend_url: backend_url(),
            server_addr: server_addr(),
            thumbnail_methods: thumbnail_methods(),
        })
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at `<data_local_dir>/playlist-cover/.env`:
/// - Linux: `~/.local/share/playlist-cover/.env`
/// - macOS: `~/Library/Application Support/playlist-cover/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-cover/.env`
///
/// The directory is created when missing. A missing `.env` file is not an
/// error since every value can also come from the real environment.
///
/// # Errors
///
/// Fails when the directory cannot be created or the file exists but cannot
/// be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns `<data_local_dir>/playlist-cover`, falling back to the working
/// directory when the platform has no data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-cover");
    path
}

/// Returns the Spotify application client id (`SPOTIFY_CLIENT_ID`).
///
/// # Errors
///
/// There is no sensible default, so a missing variable is an error.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    env::var("SPOTIFY_CLIENT_ID").map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_ID"))
}

/// Returns the OAuth redirect URI (`SPOTIFY_REDIRECT_URI`).
///
/// Must match a redirect URI registered for the Spotify application and
/// point at the local callback server, e.g. `http://127.0.0.1:8080/callback`.
pub fn spotify_redirect_uri() -> String {
    env_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space separated scopes requested at login (`SPOTIFY_SCOPE`).
pub fn spotify_scope() -> String {
    env_or("SPOTIFY_SCOPE", DEFAULT_SCOPE)
}

/// Returns the authorization endpoint (`SPOTIFY_AUTH_URL`).
pub fn spotify_auth_url() -> String {
    env_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the token endpoint (`SPOTIFY_TOKEN_URL`).
pub fn spotify_token_url() -> String {
    env_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_api_url() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the cover generation backend base URL (`BACKEND_URL`).
pub fn backend_url() -> String {
    env_or("BACKEND_URL", DEFAULT_BACKEND_URL)
}

/// Returns the bind address of the local callback server (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the generation methods offered to the user (`THUMBNAIL_METHODS`).
///
/// Comma separated; blank entries are ignored.
pub fn thumbnail_methods() -> Vec<String> {
    parse_methods(&env_or("THUMBNAIL_METHODS", DEFAULT_THUMBNAIL_METHODS))
}

pub fn parse_methods(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
