use reqwest::StatusCode;

use super::{BackendClient, read_json};
use crate::{
    error::Error,
    types::{BackendMessage, GenerationMethod, GenerationRequest, GenerationResponse, UploadRequest},
};

impl BackendClient {
    /// Asks the backend to generate a cover with `method` and returns the
    /// image URL.
    ///
    /// A success response without an `image_url` counts as malformed.
    pub async fn generate_thumbnail(
        &self,
        method: &GenerationMethod,
        request: &GenerationRequest,
    ) -> Result<String, Error> {
        let res = self
            .client
            .post(self.url(&["thumbnail", method.as_str()])?)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        let generated: GenerationResponse = read_json(res).await?;
        match generated.image_url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(Error::Server {
                status,
                message: "malformed response: missing image_url".to_string(),
            }),
        }
    }

    /// Asks the backend to set `image_url` as the playlist's artwork.
    ///
    /// Returns the backend's confirmation message.
    pub async fn upload_playlist_image(&self, request: &UploadRequest) -> Result<String, Error> {
        let res = self
            .client
            .post(self.url(&["upload-playlist-image"])?)
            .json(request)
            .send()
            .await?;

        let reply: BackendMessage = read_json(res).await?;
        match reply {
            BackendMessage {
                error: Some(error), ..
            } => Err(Error::Server {
                status: StatusCode::OK,
                message: error,
            }),
            BackendMessage { message, .. } => {
                Ok(message.unwrap_or_else(|| "Image uploaded successfully!".to_string()))
            }
        }
    }
}
