//! Desktop host built on winit.
//!
//! Frames come from continuous redraws, taps from mouse/touch releases,
//! photospheres are decoded with `image` on worker threads and the status
//! surface is the window title.

mod backend;
mod input;
mod source;
mod status;
mod video;
mod window;

pub use backend::{DecodeError, DecodingBackend, VisibleMedia};
pub use input::{InputAction, TapGate};
pub use source::{NativeSceneSource, SceneLocation};
pub use status::{SharedStatus, StatusLine, TitleErrors, TitleLoading, TitleOverlay};
pub use video::{NativeMedia, NativeVideo};
pub use window::run;

use crate::app::{EventSink, HostEvent};
use winit::event_loop::EventLoopProxy;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub scene: SceneLocation,
    /// Show frame statistics in the window title.
    pub debug: bool,
}

impl EventSink for EventLoopProxy<HostEvent> {
    fn emit(&self, event: HostEvent) {
        if self.send_event(event).is_err() {
            log::debug!("Event loop closed, dropping host event");
        }
    }
}
