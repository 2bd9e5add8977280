use axum::{Extension, extract::RawQuery, response::Html};
use reqwest::Url;

use crate::{server::CallbackState, utils};

/// Captures the redirect's query string for the waiting login flow.
///
/// The code exchange itself is left to the auth state machine, which
/// treats the captured redirect as the next page load.
pub async fn callback(
    RawQuery(query): RawQuery,
    Extension(shared_state): Extension<CallbackState>,
) -> Html<&'static str> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let url = Url::parse(&format!("http://localhost/callback?{}", query)).ok();
    let has_code = url.as_ref().and_then(utils::authorization_code).is_some();
    let has_error = url.as_ref().and_then(utils::authorization_error).is_some();

    if !has_code && !has_error {
        return Html("<h4>Missing authorization code.</h4>");
    }

    *shared_state.lock().await = Some(query);

    if has_code {
        Html("<h2>Authorization received.</h2><p>Close this browser window.</p>")
    } else {
        Html("<h4>Login failed.</h4>")
    }
}
