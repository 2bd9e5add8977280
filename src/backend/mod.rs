//! Typed client for the cover generation backend.
//!
//! | Call | Method | Path |
//! |---|---|---|
//! | [`BackendClient::list_playlists`] | GET | `/playlists/{user_id}` |
//! | [`BackendClient::list_tracks`] | GET | `/tracks/{playlist_id}` |
//! | [`BackendClient::generate_thumbnail`] | POST | `/thumbnail/{method}` |
//! | [`BackendClient::upload_playlist_image`] | POST | `/upload-playlist-image` |
//!
//! Every call returns [`crate::Error`]: `Server` for non-success statuses and
//! malformed bodies, `Network` when the request never completed. Ids travel
//! as single percent-encoded path segments; a base URL that does not parse
//! is `InvalidUrl`.

mod playlists;
mod thumbnail;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::{error::Error, types::BackendMessage};

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one so ids
    /// cannot leak into other path segments or the query.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let invalid = || Error::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Decodes a JSON body, turning non-success statuses and undecodable bodies
/// into [`Error::Server`].
///
/// For failures the backend's `{error}` field is used as the message when
/// present.
pub(crate) async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, Error> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<BackendMessage>(&body)
            .ok()
            .and_then(|m| m.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(Error::Server { status, message });
    }

    serde_json::from_str(&body).map_err(|e| Error::Server {
        status,
        message: format!("malformed response: {}", e),
    })
}
