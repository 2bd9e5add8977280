use super::{BackendClient, read_json};
use crate::{
    error::Error,
    types::{PlaylistSummary, PlaylistTrack},
};

impl BackendClient {
    /// All playlists of a Spotify user, `{id, name, image_url, track_count}` each.
    pub async fn list_playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, Error> {
        let res = self
            .client
            .get(self.url(&["playlists", user_id])?)
            .send()
            .await?;
        read_json(res).await
    }

    /// All tracks of a playlist, in playlist order.
    pub async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>, Error> {
        let res = self
            .client
            .get(self.url(&["tracks", playlist_id])?)
            .send()
            .await?;
        read_json(res).await
    }
}
