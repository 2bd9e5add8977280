use super::session::{SessionStorage, SessionStore};
use crate::{
    backend::BackendClient,
    error::Error,
    types::{PlaylistSummary, PlaylistTrack},
};

/// Playlist browsing: the view the user picks a playlist from.
pub struct Browser<'a, S: SessionStorage> {
    session: &'a SessionStore<S>,
    backend: &'a BackendClient,
}

impl<'a, S: SessionStorage> Browser<'a, S> {
    pub fn new(session: &'a SessionStore<S>, backend: &'a BackendClient) -> Self {
        Self { session, backend }
    }

    /// Lists `user_id`'s playlists and remembers the user id for later lookups.
    pub async fn playlists(&self, user_id: &str) -> Result<Vec<PlaylistSummary>, Error> {
        let playlists = self.backend.list_playlists(user_id).await?;
        self.session.set_user_id_searched(user_id).await?;
        Ok(playlists)
    }

    pub async fn tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>, Error> {
        self.backend.list_tracks(playlist_id).await
    }

    /// Finds `playlist_id` among the playlists of `user_id`, or of the last
    /// searched user when `user_id` is `None`.
    pub async fn find_playlist(
        &self,
        playlist_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<PlaylistSummary>, Error> {
        let user_id = match user_id {
            Some(id) => id.to_string(),
            None => match self.session.user_id_searched() {
                Some(id) => id,
                None => return Ok(None),
            },
        };

        let playlists = self.playlists(&user_id).await?;
        Ok(playlists.into_iter().find(|p| p.id == playlist_id))
    }
}
