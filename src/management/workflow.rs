use std::cell::{Cell, RefCell};

use super::{
    selection::TrackSelection,
    session::{SessionStorage, SessionStore},
};
use crate::{
    backend::BackendClient,
    error::{Action, AuthError, Error, ValidationError},
    events::{EventBus, Indicator, UiEvent},
    types::{
        GenerationMethod, GenerationRequest, PlaylistSummary, PlaylistTrack, SelectedPlaylist,
        Track, UploadRequest,
    },
    info, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    TracksLoaded,
    Generating,
    GeneratedOk,
    GenerationFailed,
    Uploading,
    UploadedOk,
    UploadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Idle,
    InFlight,
}

/// Puts its slot back to `Idle` when dropped, including when the future
/// holding it is dropped mid-flight.
struct InFlightGuard<'a> {
    slot: &'a Cell<Slot>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.set(Slot::Idle);
    }
}

/// Coordinates track selection, cover generation and the upload of the
/// generated cover for the selected playlist.
///
/// All operations take `&self`; the orchestrator is meant to be driven from
/// a single thread. Generation and upload each own an `Idle|InFlight` slot
/// and refuse to start while either slot is in flight, since both write
/// session state.
pub struct Workflow<'a, S: SessionStorage> {
    session: &'a SessionStore<S>,
    backend: &'a BackendClient,
    events: &'a EventBus,
    methods: Vec<GenerationMethod>,
    state: Cell<WorkflowState>,
    playlist: RefCell<Option<SelectedPlaylist>>,
    tracks: RefCell<Vec<PlaylistTrack>>,
    selection: RefCell<TrackSelection>,
    generating: Cell<Slot>,
    pushing: Cell<Slot>,
}

impl<'a, S: SessionStorage> Workflow<'a, S> {
    pub fn new(
        session: &'a SessionStore<S>,
        backend: &'a BackendClient,
        events: &'a EventBus,
        methods: impl IntoIterator<Item = GenerationMethod>,
    ) -> Self {
        Self {
            session,
            backend,
            events,
            methods: methods.into_iter().collect(),
            state: Cell::new(WorkflowState::Idle),
            playlist: RefCell::new(None),
            tracks: RefCell::new(Vec::new()),
            selection: RefCell::new(TrackSelection::default()),
            generating: Cell::new(Slot::Idle),
            pushing: Cell::new(Slot::Idle),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state.get()
    }

    pub fn methods(&self) -> &[GenerationMethod] {
        &self.methods
    }

    pub fn playlist(&self) -> Option<SelectedPlaylist> {
        self.playlist.borrow().clone()
    }

    pub fn tracks(&self) -> Vec<PlaylistTrack> {
        self.tracks.borrow().clone()
    }

    pub fn selected(&self) -> Vec<usize> {
        self.selection.borrow().indices()
    }

    pub fn generated_image(&self) -> Option<String> {
        self.session.generated_image()
    }

    pub fn is_busy(&self) -> bool {
        self.generating.get() == Slot::InFlight || self.pushing.get() == Slot::InFlight
    }

    /// Whether the push control is enabled: an image exists and nothing is
    /// in flight. The token is checked when pushing.
    pub fn can_push(&self) -> bool {
        !self.is_busy() && self.generated_image().is_some()
    }

    /// Persists `playlist` as the selected playlist and resets the workflow
    /// to `Idle`.
    pub async fn select_playlist(
        &self,
        playlist: &PlaylistSummary,
    ) -> Result<SelectedPlaylist, Error> {
        let selected = SelectedPlaylist::from(playlist);
        self.session.set_selected_playlist(&selected).await?;

        *self.playlist.borrow_mut() = Some(selected.clone());
        self.tracks.borrow_mut().clear();
        *self.selection.borrow_mut() = TrackSelection::default();
        self.state.set(WorkflowState::Idle);
        Ok(selected)
    }

    /// Page load of the generator view: picks up the selected playlist and a
    /// previously generated image from the session.
    pub fn restore(&self) -> Option<SelectedPlaylist> {
        let playlist = self.session.selected_playlist()?;
        *self.playlist.borrow_mut() = Some(playlist.clone());
        self.events.emit(UiEvent::PlaylistShown(playlist.clone()));

        if let Some(image) = self.session.generated_image() {
            self.state.set(WorkflowState::GeneratedOk);
            self.events.emit(UiEvent::ImageGenerated(image));
        }
        Some(playlist)
    }

    /// Fetches and renders the selected playlist's tracks. The selection is
    /// reset.
    pub async fn load_tracks(&self) -> Result<usize, Error> {
        let playlist = self.current_playlist()?;
        let tracks = self.backend.list_tracks(&playlist.id).await.inspect_err(|e| {
            warning!("Error fetching tracks: {}", e);
        })?;

        let count = tracks.len();
        *self.selection.borrow_mut() = TrackSelection::new(count);
        *self.tracks.borrow_mut() = tracks.clone();
        if self.state.get() == WorkflowState::Idle {
            self.state.set(WorkflowState::TracksLoaded);
        }

        self.events.emit(UiEvent::TracksRendered(tracks));
        self.emit_selection();
        Ok(count)
    }

    pub fn select_tracks(&self, indices: &[usize]) -> Result<(), Error> {
        let result = self.selection.borrow_mut().select(indices);
        result.map_err(|e| self.invalid(e))?;
        self.emit_selection();
        Ok(())
    }

    pub fn toggle_track(&self, index: usize) -> Result<(), Error> {
        let result = self.selection.borrow_mut().toggle(index);
        result.map_err(|e| self.invalid(e))?;
        self.emit_selection();
        Ok(())
    }

    pub fn select_all(&self) {
        self.selection.borrow_mut().select_all();
        self.emit_selection();
    }

    pub fn select_none(&self) {
        self.selection.borrow_mut().select_none();
        self.emit_selection();
    }

    pub fn select_random(&self) {
        self.selection.borrow_mut().select_random();
        self.emit_selection();
    }

    /// The selected tracks in playlist order, as sent to the backend.
    pub fn selected_tracks(&self) -> Vec<Track> {
        let tracks = self.tracks.borrow();
        self.selection
            .borrow()
            .indices()
            .into_iter()
            .filter_map(|i| tracks.get(i))
            .map(Track::from)
            .collect()
    }

    /// Builds the request for the current selection.
    ///
    /// The playlist title is only included when `include_title` is set.
    pub fn build_request(
        &self,
        mood: &str,
        include_title: bool,
    ) -> Result<GenerationRequest, Error> {
        let playlist = self.current_playlist()?;
        if self.state.get() == WorkflowState::Idle {
            return Err(self.invalid(ValidationError::TracksNotLoaded));
        }
        let tracks = self.selected_tracks();
        if tracks.is_empty() {
            return Err(self.invalid(ValidationError::NoTracksSelected));
        }

        Ok(GenerationRequest {
            tracks,
            mood: mood.trim().to_string(),
            playlist_title: include_title.then(|| playlist.playlist_name.trim().to_string()),
        })
    }

    /// Generates a cover from the selected tracks with `method`.
    ///
    /// Validation happens before any network call. On success the image URL
    /// is persisted and the push control revealed; on failure nothing is
    /// written and the previous image stays.
    pub async fn generate(
        &self,
        method: &GenerationMethod,
        mood: &str,
        include_title: bool,
    ) -> Result<String, Error> {
        let _in_flight = self.begin(Action::Generate)?;

        if !self.methods.contains(method) {
            return Err(self.invalid(ValidationError::UnknownMethod(method.to_string())));
        }
        let request = self.build_request(mood, include_title)?;

        self.state.set(WorkflowState::Generating);
        self.events.emit(UiEvent::MessagesCleared);
        let progress = self.events.show_progress(Indicator::Generation);

        let outcome = match self.backend.generate_thumbnail(method, &request).await {
            Ok(url) => match self.session.set_generated_image(&url).await {
                Ok(()) => Ok(url),
                Err(e) => Err(Error::from(e)),
            },
            Err(e) => Err(e),
        };
        drop(progress);

        match outcome {
            Ok(url) => {
                self.state.set(WorkflowState::GeneratedOk);
                self.events.emit(UiEvent::ImageGenerated(url.clone()));
                Ok(url)
            }
            Err(e) => {
                warning!("Error generating image: {}", e);
                self.state.set(WorkflowState::GenerationFailed);
                self.events.emit(UiEvent::GenerationFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Pushes the generated image to Spotify as the playlist's artwork.
    ///
    /// Needs a stored access token and a generated image; without either no
    /// request is made. On success the selected playlist's image is updated
    /// and persisted, the generated image is left as is.
    pub async fn push(&self) -> Result<String, Error> {
        let _in_flight = self.begin(Action::Push)?;

        let Some(access_token) = self.session.access_token() else {
            let err = AuthError::MissingToken;
            warning!("Access token is not available.");
            self.events.emit(UiEvent::Notice("Please log in first.".to_string()));
            return Err(err.into());
        };
        let Some(image_url) = self.session.generated_image() else {
            return Err(self.invalid(ValidationError::NoImageToUpload));
        };
        let mut playlist = self.current_playlist()?;

        self.state.set(WorkflowState::Uploading);
        let progress = self.events.show_progress(Indicator::Upload);

        let request = UploadRequest {
            playlist_id: playlist.id.clone(),
            image_url: image_url.clone(),
            access_token,
        };
        let uploaded = self.backend.upload_playlist_image(&request).await;
        drop(progress);

        match uploaded {
            Ok(message) => {
                info!("{}", message);
                playlist.playlist_image = image_url.clone();
                match self.session.set_selected_playlist(&playlist).await {
                    Ok(()) => *self.playlist.borrow_mut() = Some(playlist),
                    Err(e) => warning!("Failed to store updated playlist image: {}", e),
                }

                self.state.set(WorkflowState::UploadedOk);
                self.events.emit(UiEvent::UploadSucceeded(image_url));
                Ok(message)
            }
            Err(e) => {
                warning!("Error: {}", e);
                self.state.set(WorkflowState::UploadFailed);
                self.events.emit(UiEvent::UploadFailed(e.to_string()));
                Err(e)
            }
        }
    }

    fn begin(&self, action: Action) -> Result<InFlightGuard<'_>, Error> {
        if self.is_busy() {
            return Err(Error::Busy(action));
        }

        let slot = match action {
            Action::Generate => &self.generating,
            Action::Push => &self.pushing,
        };
        slot.set(Slot::InFlight);
        Ok(InFlightGuard { slot })
    }

    fn current_playlist(&self) -> Result<SelectedPlaylist, Error> {
        if let Some(playlist) = self.playlist.borrow().clone() {
            return Ok(playlist);
        }

        match self.session.selected_playlist() {
            Some(playlist) => {
                *self.playlist.borrow_mut() = Some(playlist.clone());
                Ok(playlist)
            }
            None => Err(self.invalid(ValidationError::NoPlaylistSelected)),
        }
    }

    fn invalid(&self, err: ValidationError) -> Error {
        self.events.emit(UiEvent::ValidationFailed(err.to_string()));
        err.into()
    }

    fn emit_selection(&self) {
        let selected = self.selection.borrow().indices();
        self.events.emit(UiEvent::SelectionChanged(selected));
    }
}
