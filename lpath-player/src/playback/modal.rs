//! Video modal event loop
//!
//! One `VideoModal` per opened lesson. Input arrives on two channels: player
//! events (ready, state codes) on an unbounded channel so none is ever
//! dropped, and host UI commands on a bounded one. The loop also sleeps on
//! the controller's two deadlines (next position sample, controls hide), so
//! sampling and auto-hide need no extra tasks and stop the moment the modal
//! is dropped.

use super::controller::PlaybackController;
use super::provider::VideoPlayer;
use super::session::PlaybackSnapshot;
use crate::config::PlayerSettings;
use crate::video_source::VideoSource;
use lpath_common::api::Lesson;
use lpath_common::events::{EventBus, LessonEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Event reported by the embedded player
#[derive(Debug)]
pub enum ProviderEvent<P> {
    /// Player finished loading
    Ready(P),
    /// State change (provider code)
    State(i32),
}

/// User input from the host UI
#[derive(Debug)]
pub enum ModalCommand {
    TogglePlay,
    /// Seek to seconds
    Seek(f64),
    ToggleMute,
    /// Volume slider moved (0-100)
    SetVolume(u8),
    PointerMoved,
    PointerLeft,
    /// User dismissed the modal
    Close,
    /// Current state for rendering; answered without changing anything
    Snapshot(oneshot::Sender<PlaybackSnapshot>),
}

/// Why `VideoModal::run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalExit {
    /// Video reached its natural end; the caller decides whether to close
    Completed,
    /// User dismissed the modal
    Closed,
    /// Every command sender was dropped
    Detached,
}

/// Callback that feeds provider state codes back into a modal
pub type ProviderSink = Arc<dyn Fn(i32) + Send + Sync>;

/// Sending side of a modal's channels
pub struct ModalHandle<P> {
    commands: mpsc::Sender<ModalCommand>,
    provider: mpsc::UnboundedSender<ProviderEvent<P>>,
}

impl<P> Clone for ModalHandle<P> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            provider: self.provider.clone(),
        }
    }
}

impl<P: Send + 'static> ModalHandle<P> {
    /// Queue a user command, waiting for room; false once the modal is gone
    pub async fn send(&self, command: ModalCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    /// Hand the loaded player to the modal
    pub fn player_ready(&self, player: P) -> bool {
        self.provider.send(ProviderEvent::Ready(player)).is_ok()
    }

    /// Report a provider state code; never blocks or drops while the modal
    /// is alive
    pub fn report_state(&self, code: i32) -> bool {
        self.provider.send(ProviderEvent::State(code)).is_ok()
    }

    /// Ask the running modal for its current state
    pub async fn snapshot(&self) -> Option<PlaybackSnapshot> {
        let (reply, rx) = oneshot::channel();
        if !self.send(ModalCommand::Snapshot(reply)).await {
            return None;
        }
        rx.await.ok()
    }

    /// Resolves once the modal has dropped its inbox
    pub async fn closed(&self) {
        self.commands.closed().await
    }

    /// Sink for the embedded player's state-change events
    pub fn provider_sink(&self) -> ProviderSink {
        let provider = self.provider.clone();
        Arc::new(move |code| {
            if provider.send(ProviderEvent::State(code)).is_err() {
                debug!("Provider state {} after modal closed", code);
            }
        })
    }
}

/// Receiving side of a modal's channels
pub struct ModalInbox<P> {
    commands: mpsc::Receiver<ModalCommand>,
    provider: mpsc::UnboundedReceiver<ProviderEvent<P>>,
}

/// Create the channels for one modal.
///
/// `capacity` bounds queued user commands only; player events are unbounded.
pub fn channel<P>(capacity: usize) -> (ModalHandle<P>, ModalInbox<P>) {
    let (commands_tx, commands_rx) = mpsc::channel(capacity);
    let (provider_tx, provider_rx) = mpsc::unbounded_channel();
    (
        ModalHandle {
            commands: commands_tx,
            provider: provider_tx,
        },
        ModalInbox {
            commands: commands_rx,
            provider: provider_rx,
        },
    )
}

pub struct VideoModal<P: VideoPlayer> {
    controller: PlaybackController<P>,
    source: VideoSource,
    title: String,
    events: EventBus,
}

impl<P: VideoPlayer> VideoModal<P> {
    pub fn open(lesson: &Lesson, settings: &PlayerSettings, events: EventBus) -> Self {
        let source = VideoSource::parse(&lesson.video_url);
        if !source.is_valid() {
            warn!(
                "Lesson {} has an unusable video URL: {:?}",
                lesson.id, lesson.video_url
            );
        }

        Self {
            controller: PlaybackController::new(lesson.id, settings, events.clone()),
            source,
            title: lesson.title.clone(),
            events,
        }
    }

    pub fn source(&self) -> &VideoSource {
        &self.source
    }

    /// Static message to show instead of the player, if any
    pub fn fallback_message(&self) -> Option<&'static str> {
        self.source.fallback_message()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn controller(&self) -> &PlaybackController<P> {
        &self.controller
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    /// Drive the modal until it completes, is closed or loses its senders.
    ///
    /// Pending player events are handled before user commands. May be
    /// called again after `ModalExit::Completed` to keep the modal open.
    pub async fn run(&mut self, inbox: &mut ModalInbox<P>) -> ModalExit {
        loop {
            let poll_at = self.controller.poll_deadline();
            let hide_at = self.controller.controls_deadline();

            tokio::select! {
                biased;

                Some(event) = inbox.provider.recv() => {
                    if self.on_provider_event(event) {
                        return ModalExit::Completed;
                    }
                }
                _ = sleep_until_some(poll_at), if poll_at.is_some() => {
                    self.controller.sample_progress();
                }
                _ = sleep_until_some(hide_at), if hide_at.is_some() => {
                    self.controller.controls_deadline_elapsed();
                }
                command = inbox.commands.recv() => {
                    let Some(command) = command else {
                        debug!("Modal command channel closed");
                        return ModalExit::Detached;
                    };
                    if let Some(exit) = self.apply(command) {
                        return exit;
                    }
                }
            }
        }
    }

    /// Returns true when the event completed the lesson
    fn on_provider_event(&mut self, event: ProviderEvent<P>) -> bool {
        match event {
            ProviderEvent::Ready(player) => {
                if self.source.is_valid() {
                    self.controller.on_ready(player);
                } else {
                    warn!("Ignoring player ready for an invalid video source");
                }
                false
            }
            ProviderEvent::State(code) => self.controller.on_state_change(code),
        }
    }

    fn apply(&mut self, command: ModalCommand) -> Option<ModalExit> {
        match command {
            ModalCommand::TogglePlay => self.controller.toggle_play(),
            ModalCommand::Seek(seconds) => {
                if let Err(e) = self.controller.seek(seconds) {
                    warn!("Seek rejected: {}", e);
                }
            }
            ModalCommand::ToggleMute => self.controller.toggle_mute(),
            ModalCommand::SetVolume(volume) => self.controller.set_volume(volume),
            ModalCommand::PointerMoved => self.controller.pointer_moved(),
            ModalCommand::PointerLeft => self.controller.pointer_left(),
            ModalCommand::Close => {
                let session = self.controller.session();
                info!("Lesson {}: modal closed", session.lesson_id());
                self.events.emit_lossy(LessonEvent::ModalClosed {
                    session_id: session.id(),
                    lesson_id: session.lesson_id(),
                });
                return Some(ModalExit::Closed);
            }
            ModalCommand::Snapshot(reply) => {
                // Requester may have given up waiting
                let _ = reply.send(self.controller.snapshot());
            }
        }
        None
    }

    /// Tear down the modal, releasing the player handle
    pub fn close(self) -> Option<P> {
        self.controller.into_player()
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
