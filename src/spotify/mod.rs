//! # Spotify Integration Module
//!
//! Calls made directly against Spotify's accounts service and Web API. The
//! playlist, track and upload operations go through the cover backend (see
//! [`crate::backend`]); only the pieces that need the user's own credentials
//! live here.
//!
//! ## Overview
//!
//! ```text
//! Auth State Machine (management::auth)
//!          ↓
//! Spotify Integration Layer
//!     ├── Token exchange (OAuth 2.0 PKCE)
//!     └── Profile lookup (GET /me)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ### Authentication
//!
//! [`auth`] exchanges an authorization code and its PKCE code verifier for an
//! access token. There is no refresh token handling: an expired token shows
//! up as a failing profile lookup and the user logs in again.
//!
//! ### Profile
//!
//! [`profile`] fetches the display name and avatar of the token's owner. The
//! lookup doubles as the token validity check on every page load.
//!
//! ## Error Types
//!
//! Both modules return [`crate::Error`]:
//! - **`Error::Auth`** - the token endpoint rejected the exchange
//! - **`Error::Server`** - non-success status or malformed body
//! - **`Error::Network`** - transport failure
//!
//! ## Endpoints
//!
//! Base URLs come from [`crate::config::Config`]:
//! - `POST {token_url}` - authorization code exchange (form encoded)
//! - `GET {api_url}/me` - current user profile

pub mod auth;
pub mod profile;
