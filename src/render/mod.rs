//! Render backend and media handle seams.
//!
//! The backend itself (sphere projection, stereo split, VR distortion) lives
//! outside this crate; hosts plug it in through [`RenderBackend`].

mod look;

pub use look::LookDirection;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Per-media options forwarded unchanged to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaParams {
    pub is_stereo: bool,
}

/// Display backend for photospheres and 360 video.
///
/// Preparation is asynchronous: once a source is ready the host delivers
/// `HostEvent::RenderReady`, failures arrive as `HostEvent::RenderFailed`.
pub trait RenderBackend {
    fn set_photosphere(&mut self, source: &str, params: MediaParams);
    fn set_360_video(&mut self, video: SharedVideo, params: MediaParams);
    fn set_default_look_direction(&mut self, yaw_degrees: f64);
    fn render(&mut self, timestamp_ms: f64);
}

/// CORS mode for media fetches. Video textures need `anonymous` so the
/// canvas is not tainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossOrigin {
    Anonymous,
}

impl CrossOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "anonymous",
        }
    }
}

/// Everything needed to construct a video handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    pub source: String,
    pub looping: bool,
    pub cross_origin: CrossOrigin,
}

impl VideoRequest {
    /// Looping, anonymously fetched video bound to `source`.
    pub fn looping(source: &str) -> Self {
        Self {
            source: source.to_string(),
            looping: true,
            cross_origin: CrossOrigin::Anonymous,
        }
    }
}

/// Media events a video handle reports to the host queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback can proceed without stalling for buffering.
    ReadyToPlayThrough,
    LoadError,
}

pub trait VideoElement {
    fn source(&self) -> &str;
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Duration in seconds, NaN while unknown.
    fn duration(&self) -> f64;
    fn play(&mut self);
    /// Stop reporting `event`; later occurrences are dropped by the host.
    fn unlisten(&mut self, event: MediaEvent);
    /// Lets a backend reach the host's concrete handle.
    fn as_any(&self) -> &dyn Any;
}

/// Video handle shared between the controller and the backend.
pub type SharedVideo = Rc<RefCell<dyn VideoElement>>;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("failed to create video element: {0}")]
    Create(String),
}

/// Constructs video handles. The returned handle starts loading immediately
/// and reports `HostEvent::VideoReady` / `HostEvent::VideoFailed`.
pub trait MediaFactory {
    fn create_video(&mut self, request: &VideoRequest) -> Result<SharedVideo, MediaError>;
}
