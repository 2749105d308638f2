//! Recording fakes for every collaborator, shared by the unit tests.

use crate::app::Collaborators;
use crate::render::{
    MediaError, MediaEvent, MediaFactory, MediaParams, RenderBackend, SharedVideo, VideoElement,
    VideoRequest,
};
use crate::scene::SceneSource;
use crate::ui::{ErrorSurface, GestureChannel, LoadingIndicator, PerfOverlay, StatusBridge};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LoadScene,
    SetPhotosphere { source: String, is_stereo: bool },
    Set360Video { source: String, is_stereo: bool },
    LookDirection(f64),
    Render(f64),
    CreateVideo(VideoRequest),
    Play,
    SetCurrentTime(f64),
    Unlisten(MediaEvent),
    HideLoading,
    ErrorVisible(bool),
    ErrorTitle(String),
    ErrorMessage(String),
    GestureListen,
    GestureUnlisten,
    OverlayShow,
    OverlayBegin,
    OverlayEnd,
}

#[derive(Default)]
struct JournalState {
    calls: Vec<Call>,
    error_visible: bool,
    error_title: String,
    error_message: String,
    videos: Vec<Rc<RefCell<FakeVideo>>>,
}

/// Ordered record of every collaborator call.
#[derive(Clone, Default)]
pub struct Journal {
    state: Rc<RefCell<JournalState>>,
}

impl Journal {
    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.state.borrow().calls.iter().position(predicate)
    }

    pub fn clear(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// (visible, title, message)
    pub fn error_state(&self) -> (bool, String, String) {
        let state = self.state.borrow();
        (
            state.error_visible,
            state.error_title.clone(),
            state.error_message.clone(),
        )
    }

    pub fn videos(&self) -> Vec<Rc<RefCell<FakeVideo>>> {
        self.state.borrow().videos.clone()
    }

    pub fn status_bridge(&self) -> StatusBridge {
        StatusBridge::new(
            Box::new(FakeLoading {
                journal: self.clone(),
            }),
            Box::new(FakeErrors {
                journal: self.clone(),
            }),
        )
    }

    pub fn collaborators(&self, video_duration: f64) -> Collaborators {
        Collaborators {
            scene_source: Box::new(FakeSceneSource {
                journal: self.clone(),
            }),
            renderer: Box::new(FakeRenderer {
                journal: self.clone(),
            }),
            media: Box::new(FakeMedia {
                journal: self.clone(),
                duration: video_duration,
            }),
            status: self.status_bridge(),
            gestures: Box::new(FakeGestures {
                journal: self.clone(),
            }),
            overlay: Box::new(FakeOverlay {
                journal: self.clone(),
            }),
        }
    }
}

struct FakeSceneSource {
    journal: Journal,
}

impl SceneSource for FakeSceneSource {
    fn load_scene(&mut self) {
        self.journal.record(Call::LoadScene);
    }
}

struct FakeRenderer {
    journal: Journal,
}

impl RenderBackend for FakeRenderer {
    fn set_photosphere(&mut self, source: &str, params: MediaParams) {
        self.journal.record(Call::SetPhotosphere {
            source: source.to_string(),
            is_stereo: params.is_stereo,
        });
    }

    fn set_360_video(&mut self, video: SharedVideo, params: MediaParams) {
        let source = video.borrow().source().to_string();
        self.journal.record(Call::Set360Video {
            source,
            is_stereo: params.is_stereo,
        });
    }

    fn set_default_look_direction(&mut self, yaw_degrees: f64) {
        self.journal.record(Call::LookDirection(yaw_degrees));
    }

    fn render(&mut self, timestamp_ms: f64) {
        self.journal.record(Call::Render(timestamp_ms));
    }
}

struct FakeMedia {
    journal: Journal,
    duration: f64,
}

impl MediaFactory for FakeMedia {
    fn create_video(&mut self, request: &VideoRequest) -> Result<SharedVideo, MediaError> {
        self.journal.record(Call::CreateVideo(request.clone()));
        let video = FakeVideo::shared(&self.journal, &request.source, self.duration);
        self.journal.state.borrow_mut().videos.push(video.clone());
        Ok(video)
    }
}

pub struct FakeVideo {
    journal: Journal,
    source: String,
    duration: f64,
    current_time: f64,
}

impl FakeVideo {
    pub fn shared(journal: &Journal, source: &str, duration: f64) -> Rc<RefCell<FakeVideo>> {
        Rc::new(RefCell::new(FakeVideo {
            journal: journal.clone(),
            source: source.to_string(),
            duration,
            current_time: 0.0,
        }))
    }
}

impl VideoElement for FakeVideo {
    fn source(&self) -> &str {
        &self.source
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
        self.journal.record(Call::SetCurrentTime(seconds));
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn play(&mut self) {
        self.journal.record(Call::Play);
    }

    fn unlisten(&mut self, event: MediaEvent) {
        self.journal.record(Call::Unlisten(event));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct FakeLoading {
    journal: Journal,
}

impl LoadingIndicator for FakeLoading {
    fn hide(&mut self) {
        self.journal.record(Call::HideLoading);
    }
}

struct FakeErrors {
    journal: Journal,
}

impl ErrorSurface for FakeErrors {
    fn set_visible(&mut self, visible: bool) {
        self.journal.state.borrow_mut().error_visible = visible;
        self.journal.record(Call::ErrorVisible(visible));
    }

    fn set_title(&mut self, title: &str) {
        self.journal.state.borrow_mut().error_title = title.to_string();
        self.journal.record(Call::ErrorTitle(title.to_string()));
    }

    fn set_message(&mut self, message: &str) {
        self.journal.state.borrow_mut().error_message = message.to_string();
        self.journal.record(Call::ErrorMessage(message.to_string()));
    }
}

struct FakeGestures {
    journal: Journal,
}

impl GestureChannel for FakeGestures {
    fn listen(&mut self) {
        self.journal.record(Call::GestureListen);
    }

    fn unlisten(&mut self) {
        self.journal.record(Call::GestureUnlisten);
    }
}

struct FakeOverlay {
    journal: Journal,
}

impl PerfOverlay for FakeOverlay {
    fn show(&mut self) {
        self.journal.record(Call::OverlayShow);
    }

    fn begin(&mut self) {
        self.journal.record(Call::OverlayBegin);
    }

    fn end(&mut self) {
        self.journal.record(Call::OverlayEnd);
    }
}
