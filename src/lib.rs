//! Playlist Cover Library
//!
//! This library lets a user sign in to Spotify with OAuth 2.0 PKCE, browse
//! playlists through a cover generation backend, pick tracks, request a
//! generated cover image and push that image back to Spotify as the
//! playlist's artwork.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `backend` - Typed client for the cover generation backend
//! - `cli` - Command-line rendering layer
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every component
//! - `events` - UI events emitted by the state machines
//! - `management` - Session store, auth state machine and workflow orchestrator
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify accounts and Web API calls
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and URL utilities
//!
//! # Example
//!
//! ```
//! use playlist_cover::{config, management::{MemoryStorage, SessionStore}};
//!
//! #[tokio::main]
//! async fn main() -> playlist_cover::Res<()> {
//!     config::load_env().await?;
//!     let session = SessionStore::new(MemoryStorage::default());
//!     // Drive the auth machine and the workflow...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for the command-line layer.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so any
/// library error, I/O error or configuration error can be bubbled up to
/// `main` with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading tracks for {}", playlist_name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Cover pushed to Spotify");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable startup failures in the binary, such as a
/// missing client id. Library code never calls it: every workflow failure
/// returns control to the caller instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures: a rejected upload, a generation the
/// backend could not complete, a profile that failed to load.
///
/// # Example
///
/// ```
/// warning!("Generation failed: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
