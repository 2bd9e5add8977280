use reqwest::Client;

use crate::{
    backend::read_json,
    config::Config,
    error::{AuthError, Error},
    types::TokenResponse,
    warning,
};

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by posting the authorization code and
/// the code verifier generated at login to the token endpoint. The verifier
/// proves that the client finishing the flow is the one that started it.
///
/// # Arguments
///
/// * `config` - Endpoints, client id and redirect URI
/// * `code` - Authorization code taken from the redirect URL
/// * `verifier` - PKCE code verifier stored when the login started
///
/// # Request
///
/// Form encoded body with `client_id`, `grant_type=authorization_code`,
/// `code`, `redirect_uri` and `code_verifier`.
///
/// # Returns
///
/// - `Ok(TokenResponse)` - the token endpoint accepted the exchange
/// - `Err(Error::Auth(AuthError::TokenRejected))` - non-success status, e.g.
///   the user is not allowed to use this application
/// - `Err(Error::Server)` - success status but the body has no access token
/// - `Err(Error::Network)` - the request never completed
///
/// # Example
///
/// ```
/// let token = exchange_code_pkce(&config, "AQA...auth_code", "dBjftJeZ...verifier").await?;
/// println!("Access token: {}", token.access_token);
/// ```
///
/// # Security Note
///
/// Authorization codes are single use and expire quickly, so the exchange
/// happens on the page load that carries the code.
pub async fn exchange_code_pkce(
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<TokenResponse, Error> {
    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        warning!("Token exchange failed with status {}: {}", status, body);
        return Err(AuthError::TokenRejected { status }.into());
    }

    read_json::<TokenResponse>(res).await
}
