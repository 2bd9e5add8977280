use tabled::Table;

use super::Context;
use crate::{
    info, success,
    types::{PlaylistTableRow, PlaylistTrack, TrackTableRow},
    warning,
};

pub async fn playlists(ctx: &Context, user_id: String) {
    match ctx.browser().playlists(&user_id).await {
        Ok(playlists) => {
            if playlists.is_empty() {
                info!("User {} has no public playlists.", user_id);
                return;
            }

            let rows: Vec<PlaylistTableRow> = playlists
                .into_iter()
                .map(|p| PlaylistTableRow {
                    id: p.id,
                    name: p.name,
                    tracks: p.track_count,
                })
                .collect();
            println!("{}", Table::new(rows));
            info!("Run `playlist-cover select <id>` to pick a playlist.");
        }
        Err(e) => warning!(
            "Failed to fetch playlists. Please check the User ID and try again. Err: {}",
            e
        ),
    }
}

pub async fn tracks(ctx: &Context, playlist_id: String) {
    match ctx.browser().tracks(&playlist_id).await {
        Ok(tracks) => println!("{}", Table::new(track_rows(&tracks, &[]))),
        Err(e) => warning!("Error fetching tracks: {}", e),
    }
}

pub async fn select(ctx: &Context, playlist_id: String, user_id: Option<String>) {
    let found = match ctx
        .browser()
        .find_playlist(&playlist_id, user_id.as_deref())
        .await
    {
        Ok(found) => found,
        Err(e) => {
            warning!("Failed to fetch playlists: {}", e);
            return;
        }
    };

    let Some(playlist) = found else {
        warning!(
            "Playlist {} not found. Run `playlist-cover playlists <user_id>` first or pass --user.",
            playlist_id
        );
        return;
    };

    match ctx.workflow().select_playlist(&playlist).await {
        Ok(selected) => success!("Selected playlist {}.", selected.playlist_name),
        Err(e) => warning!("Failed to store selected playlist: {}", e),
    }
}

/// Page load of the generator view.
pub async fn show(ctx: &Context) {
    let workflow = ctx.workflow();
    let Some(playlist) = workflow.restore() else {
        warning!("No playlist selected. Run `playlist-cover select <id>` first.");
        return;
    };

    info!("Current cover: {}", playlist.playlist_image);
    if workflow.generated_image().is_none() {
        info!("No cover generated yet.");
    }

    if workflow.load_tracks().await.is_ok() {
        println!("{}", Table::new(track_rows(&workflow.tracks(), &[])));
    }
}

pub(super) fn track_rows(tracks: &[PlaylistTrack], selected: &[usize]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(index, t)| TrackTableRow {
            index,
            selected: if selected.contains(&index) { "x" } else { "" }.to_string(),
            title: t.track_name.clone(),
            artist: t.artist.clone(),
        })
        .collect()
}
