//! # API Module
//!
//! HTTP endpoints of the local server that stands in for the redirect page
//! during login.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the browser after the user approved (or denied)
//!   access on Spotify's authorization page and hands the redirect's query
//!   string to the waiting login flow.
//! - [`health`] - Returns status and version, handy to check that the port
//!   configured in `SERVER_ADDRESS` is really ours.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use playlist_cover::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
