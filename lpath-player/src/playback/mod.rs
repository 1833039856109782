//! Video modal playback: controller, timers and the modal event loop

pub mod controller;
pub mod controls;
pub mod modal;
pub mod poller;
pub mod provider;
pub mod session;
pub mod simulated;

pub use controller::PlaybackController;
pub use controls::ControlsAutoHide;
pub use modal::{
    channel, ModalCommand, ModalExit, ModalHandle, ModalInbox, ProviderEvent, ProviderSink,
    VideoModal,
};
pub use poller::ProgressPoller;
pub use provider::{ProviderState, VideoPlayer};
pub use session::{PlaybackSession, PlaybackSnapshot};
pub use simulated::SimulatedPlayer;
