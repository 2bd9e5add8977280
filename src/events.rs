//! UI events emitted by the auth state machine and the workflow orchestrator.
//!
//! The state machines never draw anything themselves. They publish
//! [`UiEvent`]s on an [`EventBus`] and a rendering layer (the terminal
//! renderer in [`crate::cli`], or a test recorder) subscribes to them.

use std::cell::RefCell;

use crate::types::{PlaylistTrack, SelectedPlaylist};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Generation,
    Upload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Logged-out visual state: profile hidden, login control visible.
    LoginVisible,
    ProfileLoaded {
        display_name: Option<String>,
        avatar_url: String,
    },
    /// A notice the user has to acknowledge.
    Notice(String),
    PlaylistShown(SelectedPlaylist),
    TracksRendered(Vec<PlaylistTrack>),
    SelectionChanged(Vec<usize>),
    ProgressShown(Indicator),
    ProgressHidden(Indicator),
    /// Success and failure messages of earlier runs are hidden.
    MessagesCleared,
    ValidationFailed(String),
    /// Preview and push control revealed.
    ImageGenerated(String),
    GenerationFailed(String),
    UploadSucceeded(String),
    UploadFailed(String),
}

type Subscriber = Box<dyn Fn(&UiEvent)>;

/// Single-threaded observer list.
///
/// Subscribers are called synchronously, in subscription order. A subscriber
/// must not subscribe further observers from inside its callback.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&UiEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    pub fn emit(&self, event: UiEvent) {
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(&event);
        }
    }

    /// Shows `indicator` until the returned guard is dropped.
    pub fn show_progress(&self, indicator: Indicator) -> ProgressGuard<'_> {
        self.emit(UiEvent::ProgressShown(indicator));
        ProgressGuard {
            bus: self,
            indicator,
        }
    }
}

pub struct ProgressGuard<'a> {
    bus: &'a EventBus,
    indicator: Indicator,
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.bus.emit(UiEvent::ProgressHidden(self.indicator));
    }
}
