use crate::capability::{Capabilities, PlatformClass};
use crate::render::{SharedVideo, VideoRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoPhase {
    #[default]
    Idle,
    AwaitingCodecReady,
    Unsupported,
    AwaitingGesture,
    Playing,
}

/// What entering the video flow turns into on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEntry {
    /// Host cannot stream video, but the scene has a still image.
    FallbackImage(String),
    Unsupported,
    Load(VideoRequest),
}

pub fn video_entry(video: &str, fallback_image: Option<&str>, caps: &Capabilities) -> VideoEntry {
    if caps.legacy_browser {
        return match fallback_image {
            Some(image) => VideoEntry::FallbackImage(image.to_string()),
            None => VideoEntry::Unsupported,
        };
    }
    VideoEntry::Load(VideoRequest::looping(video))
}

/// How a video that reported ready gets started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyAction {
    /// Render loop drives the playback position, play() is never called.
    DriveClock,
    Autoplay,
    AwaitGesture,
}

pub fn ready_action(caps: &Capabilities) -> ReadyAction {
    match caps.platform() {
        PlatformClass::QuirkyMobile => ReadyAction::DriveClock,
        PlatformClass::Desktop => ReadyAction::Autoplay,
        PlatformClass::GenericMobile => ReadyAction::AwaitGesture,
    }
}

/// Video session state owned by the controller.
#[derive(Default)]
pub struct PlaybackState {
    element: Option<SharedVideo>,
    force_time_update: bool,
    start_time: Option<f64>,
    phase: VideoPhase,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, element: SharedVideo) {
        self.element = Some(element);
        self.phase = VideoPhase::AwaitingCodecReady;
    }

    pub fn element(&self) -> Option<&SharedVideo> {
        self.element.as_ref()
    }

    pub fn phase(&self) -> VideoPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: VideoPhase) {
        log::debug!("Video phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    pub fn force_time_update(&self) -> bool {
        self.force_time_update
    }

    pub fn enable_forced_time_update(&mut self) {
        self.force_time_update = true;
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Drive the video clock from the frame clock.
    ///
    /// The first tick after activation records the start time; later ticks
    /// seek to `((now - start) / 1000) % duration` and return that position.
    pub fn sync_clock(&mut self, now_ms: f64) -> Option<f64> {
        if !self.force_time_update {
            return None;
        }
        let element = self.element.as_ref()?;
        let Some(start) = self.start_time else {
            self.start_time = Some(now_ms);
            return None;
        };
        let duration = element.borrow().duration();
        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }
        let position = ((now_ms - start) / 1000.0) % duration;
        element.borrow_mut().set_current_time(position);
        Some(position)
    }
}
