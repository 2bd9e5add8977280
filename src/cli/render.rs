use std::{cell::RefCell, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    events::{EventBus, Indicator, UiEvent},
    info, success, warning,
};

/// Subscribes a terminal renderer to `bus`.
///
/// Progress indicators become spinners, everything else is printed with the
/// crate's status macros.
pub fn attach(bus: &EventBus) {
    let spinner: RefCell<Option<ProgressBar>> = RefCell::new(None);

    bus.subscribe(move |event| match event {
        UiEvent::LoginVisible => {
            info!("Not logged in. Run `playlist-cover login` to connect your Spotify account.")
        }
        UiEvent::ProfileLoaded {
            display_name,
            avatar_url,
        } => {
            success!(
                "Logged in as: {}",
                display_name.as_deref().unwrap_or("(no display name)")
            );
            info!("Avatar: {}", avatar_url);
        }
        UiEvent::Notice(message) => warning!("{}", message),
        UiEvent::PlaylistShown(playlist) => info!(
            "Playlist: {} ({} track(s))",
            playlist.playlist_name, playlist.track_count
        ),
        UiEvent::TracksRendered(tracks) => info!("{} track(s) loaded", tracks.len()),
        UiEvent::SelectionChanged(_) | UiEvent::MessagesCleared => {}
        UiEvent::ProgressShown(indicator) => {
            let message = match indicator {
                Indicator::Generation => "Generating cover...",
                Indicator::Upload => "Pushing cover to Spotify...",
            };
            *spinner.borrow_mut() = Some(new_spinner(message));
        }
        UiEvent::ProgressHidden(_) => {
            if let Some(pb) = spinner.borrow_mut().take() {
                pb.finish_and_clear();
            }
        }
        UiEvent::ValidationFailed(message) => warning!("{}", message),
        UiEvent::ImageGenerated(url) => {
            success!("Cover ready: {}", url);
            info!("Run `playlist-cover push` to use it as the playlist cover.");
        }
        UiEvent::GenerationFailed(reason) => warning!("Cover generation failed: {}", reason),
        UiEvent::UploadSucceeded(_) => success!("Playlist cover updated on Spotify."),
        UiEvent::UploadFailed(reason) => warning!("Upload failed: {}", reason),
    });
}

fn new_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
