use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub track_count: u64,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub tracks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub image_url: String,
    pub artist: String,
    #[serde(alias = "name")]
    pub track_name: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub selected: String,
    pub title: String,
    pub artist: String,
}

/// The playlist the user picked in the browse view.
///
/// `playlist_image` is rewritten after a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlaylist {
    pub id: String,
    pub playlist_name: String,
    pub playlist_image: String,
    pub track_count: u64,
}

impl From<&PlaylistSummary> for SelectedPlaylist {
    fn from(playlist: &PlaylistSummary) -> Self {
        Self {
            id: playlist.id.clone(),
            playlist_name: playlist.name.clone(),
            playlist_image: playlist.image_url.clone(),
            track_count: playlist.track_count,
        }
    }
}

/// A track as sent to the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub image_url: String,
    pub artist: String,
    pub title: String,
}

impl From<&PlaylistTrack> for Track {
    fn from(track: &PlaylistTrack) -> Self {
        Self {
            image_url: track.image_url.clone(),
            artist: track.artist.clone(),
            title: track.track_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub tracks: Vec<Track>,
    pub mood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub playlist_id: String,
    pub image_url: String,
    pub access_token: String,
}

/// `{message}` on success, `{error}` on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Name of a cover generation method, used as the `/thumbnail/{method}` path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationMethod(String);

impl GenerationMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GenerationMethod {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
