use std::{sync::Arc, time::Duration};

use reqwest::Url;
use tokio::sync::Mutex;

use super::Context;
use crate::{
    config::Config,
    info,
    management::AuthState,
    server::{CallbackState, start_api_server},
    success, warning,
};

const CALLBACK_WAIT: Duration = Duration::from_secs(60);

/// Logs in with OAuth 2.0 PKCE.
///
/// 1. Runs a page load; a valid stored token means there is nothing to do
/// 2. Stores a fresh code verifier and builds the authorization URL
/// 3. Starts the local callback server and opens the URL in the browser
/// 4. Waits for the browser to come back to `/callback`
/// 5. Runs a second page load with the redirect URL, which exchanges the
///    code for a token and loads the profile
///
/// If the browser cannot be opened the URL is printed instead.
pub async fn login(ctx: &Context) {
    let auth = ctx.auth();
    if auth.on_page_load(None).await == AuthState::LoggedIn {
        info!("Already logged in. Run `playlist-cover logout` to switch accounts.");
        return;
    }

    let auth_url = match auth.begin_login().await {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot start login: {}", e);
            return;
        }
    };

    let callback: CallbackState = Arc::new(Mutex::new(None));
    let server_state = Arc::clone(&callback);
    let addr = ctx.config.server_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(&addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let Some(query) = wait_for_callback(callback).await else {
        warning!("Login was not completed in time. Run `playlist-cover login` again.");
        return;
    };

    let location = redirect_location(&ctx.config, &query);
    match auth.on_page_load(location.as_ref()).await {
        AuthState::LoggedIn => success!("Authentication successful!"),
        state => warning!("Login did not complete (state: {:?}).", state),
    }
}

/// Page load of the landing page, optionally with the URL the browser was
/// redirected to.
pub async fn status(ctx: &Context, url: Option<String>) {
    let location = match url.as_deref().map(Url::parse) {
        Some(Ok(url)) => Some(url),
        Some(Err(e)) => {
            warning!("Ignoring invalid URL: {}", e);
            None
        }
        None => None,
    };

    let state = ctx.auth().on_page_load(location.as_ref()).await;
    info!("Login state: {:?}", state);
}

pub async fn logout(ctx: &Context) {
    match ctx.auth().end_session().await {
        Ok(()) => success!("Session ended."),
        Err(e) => warning!("Failed to end session: {}", e),
    }
}

/// Rebuilds the redirect URL the browser landed on from the configured
/// redirect URI and the captured query string.
pub fn redirect_location(config: &Config, query: &str) -> Option<Url> {
    let mut url = Url::parse(&config.redirect_uri).ok()?;
    url.set_query(Some(query));
    Some(url)
}

async fn wait_for_callback(shared_state: CallbackState) -> Option<String> {
    use std::time::Instant;

    let start = Instant::now();
    while start.elapsed() < CALLBACK_WAIT {
        if let Some(query) = shared_state.lock().await.take() {
            return Some(query);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
