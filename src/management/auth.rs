use std::cell::{Cell, RefCell};

use reqwest::Url;

use super::session::{SessionStorage, SessionStore};
use crate::{
    config::Config,
    error::{AuthError, Error},
    events::{EventBus, UiEvent},
    spotify,
    types::UserProfile,
    utils, warning,
};

pub const UNAUTHORIZED_NOTICE: &str = "You are not authorized. You can create playlist covers \
but you won't be able to upload them to Spotify.\n\nAsk the application owner for access, \
mentioning the email address your Spotify account is registered with.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    /// Verifier stored, user sent to the authorization endpoint.
    PendingRedirect,
    /// Authorization code received, token request in flight.
    ExchangingCode,
    LoggedIn,
    /// Token exchange failed or was rejected.
    Unauthorized,
}

/// Drives the authorization-code-with-PKCE exchange and tracks login state.
///
/// Only this machine writes the code verifier and the access token to the
/// session.
pub struct AuthMachine<'a, S: SessionStorage> {
    config: &'a Config,
    session: &'a SessionStore<S>,
    events: &'a EventBus,
    state: Cell<AuthState>,
    profile: RefCell<Option<UserProfile>>,
}

impl<'a, S: SessionStorage> AuthMachine<'a, S> {
    pub fn new(config: &'a Config, session: &'a SessionStore<S>, events: &'a EventBus) -> Self {
        Self {
            config,
            session,
            events,
            state: Cell::new(AuthState::LoggedOut),
            profile: RefCell::new(None),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.access_token()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.borrow().clone()
    }

    /// Starts a login: stores a fresh code verifier and returns the
    /// authorization URL the user has to be sent to.
    ///
    /// Nothing is written when the verifier cannot be generated.
    pub async fn begin_login(&self) -> Result<Url, Error> {
        let verifier = utils::generate_code_verifier(utils::CODE_VERIFIER_LENGTH)?;
        let challenge = utils::generate_code_challenge(&verifier);
        let url = utils::authorization_url(self.config, &challenge)?;

        self.session.set_code_verifier(&verifier).await?;
        self.state.set(AuthState::PendingRedirect);
        Ok(url)
    }

    /// Runs the page-load step for `location`, the URL the page was opened
    /// with (if any).
    ///
    /// - a stored token wins: `LoggedIn` without an exchange, then the token
    ///   is verified through the profile endpoint
    /// - otherwise a `code` query parameter triggers exactly one exchange
    /// - otherwise the user is `LoggedOut`
    pub async fn on_page_load(&self, location: Option<&Url>) -> AuthState {
        if self.session.access_token().is_some() {
            self.state.set(AuthState::LoggedIn);
            self.verify_token().await;
            return self.state();
        }

        match location.and_then(utils::authorization_code) {
            Some(code) => self.complete_login(&code).await,
            None => {
                if let Some(reason) = location.and_then(utils::authorization_error) {
                    let err = AuthError::Denied(reason);
                    warning!("{}", err);
                    self.events.emit(UiEvent::Notice(err.to_string()));
                }
                self.enter_logged_out();
            }
        }

        self.state()
    }

    /// Drops every session key and returns to `LoggedOut`.
    pub async fn end_session(&self) -> Result<(), Error> {
        self.session.end_session().await?;
        self.enter_logged_out();
        Ok(())
    }

    async fn complete_login(&self, code: &str) {
        self.state.set(AuthState::ExchangingCode);

        let Some(verifier) = self.session.code_verifier() else {
            self.reject(AuthError::MissingVerifier.into());
            return;
        };

        let exchanged = spotify::auth::exchange_code_pkce(self.config, code, &verifier).await;
        if let Err(e) = self.session.clear_code_verifier().await {
            warning!("Failed to clear code verifier: {}", e);
        }

        let token = match exchanged {
            Ok(token) => token,
            Err(e) => return self.reject(e),
        };

        if let Err(e) = self.session.set_access_token(&token.access_token).await {
            return self.reject(e.into());
        }

        self.state.set(AuthState::LoggedIn);
        self.verify_token().await;
    }

    async fn verify_token(&self) {
        let Some(token) = self.session.access_token() else {
            self.enter_logged_out();
            return;
        };

        match spotify::profile::fetch_profile(self.config, &token).await {
            Ok(profile) => {
                self.events.emit(UiEvent::ProfileLoaded {
                    display_name: profile.display_name.clone(),
                    avatar_url: profile.avatar_url(),
                });
                *self.profile.borrow_mut() = Some(profile);
            }
            Err(e) => {
                warning!("Error fetching user profile: {}", e);
                if let Err(e) = self.session.clear_access_token().await {
                    warning!("Failed to clear stored token: {}", e);
                }
                self.enter_logged_out();
            }
        }
    }

    fn reject(&self, err: Error) {
        warning!("Login failed: {}", err);
        self.state.set(AuthState::Unauthorized);
        *self.profile.borrow_mut() = None;

        let notice = match err {
            Error::Auth(AuthError::TokenRejected { .. }) => UNAUTHORIZED_NOTICE.to_string(),
            other => format!("Login failed: {}", other),
        };
        self.events.emit(UiEvent::Notice(notice));
        self.events.emit(UiEvent::LoginVisible);
    }

    fn enter_logged_out(&self) {
        self.state.set(AuthState::LoggedOut);
        *self.profile.borrow_mut() = None;
        self.events.emit(UiEvent::LoginVisible);
    }
}
