use reqwest::Client;

use crate::{backend::read_json, config::Config, error::Error, types::UserProfile};

/// Avatar shown when the account has no profile picture.
pub const DEFAULT_AVATAR_URL: &str =
    "https://i0.wp.com/sbcf.fr/wp-content/uploads/2018/03/sbcf-default-avatar.png?w=300&ssl=1";

/// Fetches the profile of the user owning `token` from `GET {api_url}/me`.
///
/// Any non-success status, most commonly 401 for an expired token, is
/// returned as [`Error::Server`].
pub async fn fetch_profile(config: &Config, token: &str) -> Result<UserProfile, Error> {
    let client = Client::new();
    let res = client
        .get(format!("{}/me", config.api_url.trim_end_matches('/')))
        .bearer_auth(token)
        .send()
        .await?;

    read_json::<UserProfile>(res).await
}

impl UserProfile {
    pub fn avatar_url(&self) -> String {
        self.images
            .first()
            .map(|image| image.url.clone())
            .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string())
    }
}
