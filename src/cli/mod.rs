//! # CLI Module
//!
//! The command-line rendering layer. Every invocation of the binary is one
//! "page load": it opens the persisted session, builds the state machines
//! from [`crate::management`] over it and renders the [`UiEvent`]s they
//! emit to the terminal.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`login`] - OAuth 2.0 PKCE login through the browser and the local callback server
//! - [`status`] - Page load of the landing page: shows who is logged in
//! - [`logout`] - Ends the session, dropping every stored value
//!
//! ### Browsing
//!
//! - [`playlists`] - Lists a user's playlists
//! - [`tracks`] - Lists a playlist's tracks
//! - [`select`] - Picks the playlist to generate a cover for
//!
//! ### Cover workflow
//!
//! - [`show`] - Shows the selected playlist and the last generated cover
//! - [`generate`] - Selects tracks and generates a cover
//! - [`push`] - Uploads the generated cover as the playlist artwork
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (rendering, user input)
//!     ↓ operations          ↑ UiEvent
//! Management Layer (auth machine, workflow, session store)
//!     ↓
//! Backend / Spotify clients
//! ```
//!
//! [`UiEvent`]: crate::events::UiEvent

mod auth;
mod generate;
mod playlist;
mod render;

pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use generate::TrackChoice;
pub use generate::generate;
pub use generate::push;
pub use playlist::playlists;
pub use playlist::select;
pub use playlist::show;
pub use playlist::tracks;

use crate::{
    Res,
    backend::BackendClient,
    config::Config,
    events::EventBus,
    management::{AuthMachine, Browser, FileStorage, SessionStore, Workflow},
    types::GenerationMethod,
};

/// Everything a command needs for one page load.
pub struct Context {
    pub config: Config,
    pub session: SessionStore<FileStorage>,
    pub events: EventBus,
    pub backend: BackendClient,
}

impl Context {
    pub async fn load() -> Res<Self> {
        let config = Config::from_env()?;
        let session = SessionStore::new(FileStorage::open_default().await?);
        let events = EventBus::new();
        render::attach(&events);
        let backend = BackendClient::new(config.backend_url.clone());

        Ok(Self {
            config,
            session,
            events,
            backend,
        })
    }

    pub fn auth(&self) -> AuthMachine<'_, FileStorage> {
        AuthMachine::new(&self.config, &self.session, &self.events)
    }

    pub fn workflow(&self) -> Workflow<'_, FileStorage> {
        let methods = self
            .config
            .thumbnail_methods
            .iter()
            .map(|m| GenerationMethod::new(m.as_str()));
        Workflow::new(&self.session, &self.backend, &self.events, methods)
    }

    pub fn browser(&self) -> Browser<'_, FileStorage> {
        Browser::new(&self.session, &self.backend)
    }
}
