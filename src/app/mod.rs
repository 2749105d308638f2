//! Scene presentation controller.
//!
//! Owns every piece of session state and reacts to [`HostEvent`]s delivered
//! one at a time by the host:
//! - capability gate and scene loading
//! - dispatch of the loaded scene to the preview, video or image path
//! - video readiness, platform playback quirks and the tap-to-start gate
//! - the per-frame tick, including the forced video clock
//!
//! Failures never leave the controller; they end on the [`StatusBridge`].

mod events;
mod failure;
pub mod playback;
mod render_loop;
mod session;
mod timing;

pub use events::{
    event_channel, EventSink, HostEvent, HostEventReceiver, HostEventSender, OneShot,
};
pub use failure::{Failure, PLAY_PROMPT_TITLE};
pub use playback::{PlaybackState, ReadyAction, VideoEntry, VideoPhase};
pub use render_loop::{LoopControl, LoopHandle};
pub use session::{Session, SessionEvents};
pub use timing::{FrameStats, StatsSummary};

use crate::capability::Capabilities;
use crate::render::{MediaEvent, MediaFactory, MediaParams, RenderBackend};
use crate::scene::{select_presentation, Presentation, SceneDescriptor, SceneSource};
use crate::ui::{GestureChannel, PerfOverlay, StatusBridge};

/// External collaborators the controller drives.
pub struct Collaborators {
    pub scene_source: Box<dyn SceneSource>,
    pub renderer: Box<dyn RenderBackend>,
    pub media: Box<dyn MediaFactory>,
    pub status: StatusBridge,
    pub gestures: Box<dyn GestureChannel>,
    pub overlay: Box<dyn PerfOverlay>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Startup {
    /// Scene requested; the host should start delivering frames.
    Running,
    /// Capability gate failed; nothing else will happen.
    Aborted,
}

/// What to do when the render backend reports a source as ready.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RenderReadyHandler {
    HideLoading,
    SwapPreview { image: Option<String> },
}

pub struct Controller {
    caps: Capabilities,
    host: Collaborators,
    loaded_scene: Option<SceneDescriptor>,
    stats_active: bool,
    playback: PlaybackState,
    scene_result: OneShot<()>,
    render_ready: OneShot<RenderReadyHandler>,
    video_ready: OneShot<()>,
    video_error: OneShot<()>,
    tap: OneShot<()>,
    loop_handle: LoopHandle,
}

impl Controller {
    pub fn new(caps: Capabilities, host: Collaborators) -> Self {
        Self {
            caps,
            host,
            loaded_scene: None,
            stats_active: false,
            playback: PlaybackState::new(),
            scene_result: OneShot::new(),
            render_ready: OneShot::new(),
            video_ready: OneShot::new(),
            video_error: OneShot::new(),
            tap: OneShot::new(),
            loop_handle: LoopHandle::new(),
        }
    }

    /// Capability gate, then scene load. Call once.
    pub fn start(&mut self) -> Startup {
        if !self.caps.graphics {
            self.report(Failure::UnsupportedEnvironment);
            return Startup::Aborted;
        }
        self.scene_result.arm(());
        self.host.scene_source.load_scene();

        if self.caps.debug {
            self.host.overlay.show();
            self.stats_active = true;
        }
        Startup::Running
    }

    pub fn handle(&mut self, event: HostEvent) -> LoopControl {
        match event {
            HostEvent::SceneLoaded(scene) => self.on_scene_loaded(scene),
            HostEvent::SceneFailed(message) => self.on_scene_failed(message),
            HostEvent::RenderReady => self.on_render_ready(),
            HostEvent::RenderFailed(message) => self.report(Failure::RenderBackend(message)),
            HostEvent::VideoReady => self.on_video_ready(),
            HostEvent::VideoFailed(detail) => self.on_video_failed(detail),
            HostEvent::Tap => self.on_tap(),
            HostEvent::Frame(now_ms) => return self.tick(now_ms),
        }
        LoopControl::Continue
    }

    /// One render-loop iteration.
    pub fn tick(&mut self, now_ms: f64) -> LoopControl {
        if !self.loop_handle.is_running() {
            return LoopControl::Stop;
        }
        if self.stats_active {
            self.host.overlay.begin();
        }
        if let Some(position) = self.playback.sync_clock(now_ms) {
            log::trace!("Forced video position {:.3}s", position);
        }
        self.host.renderer.render(now_ms);
        if self.stats_active {
            self.host.overlay.end();
        }
        self.loop_handle.control()
    }

    pub fn report_failure(&mut self, message: &str, title: Option<&str>) {
        self.host.status.report_failure(message, title);
    }

    pub fn dismiss_failure(&mut self) {
        self.host.status.dismiss_failure();
    }

    pub fn loop_handle(&self) -> LoopHandle {
        self.loop_handle.clone()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn loaded_scene(&self) -> Option<&SceneDescriptor> {
        self.loaded_scene.as_ref()
    }

    pub fn stats_active(&self) -> bool {
        self.stats_active
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    fn report(&mut self, failure: Failure) {
        if failure.is_fatal() {
            log::warn!("{}", failure);
        } else {
            log::info!("{}", failure);
        }
        self.host
            .status
            .report_failure(&failure.to_string(), Some(failure.title()));
    }

    fn on_scene_failed(&mut self, message: String) {
        if self.scene_result.fire().is_none() {
            log::debug!("Ignoring repeated scene failure: {}", message);
            return;
        }
        self.report(Failure::SceneLoad(message));
    }

    fn on_scene_loaded(&mut self, scene: SceneDescriptor) {
        if self.scene_result.fire().is_none() {
            log::debug!("Ignoring repeated scene load");
            return;
        }
        if !scene.is_complete() {
            self.report(Failure::SceneUnusable);
            return;
        }

        let params = scene.media_params();
        self.host.renderer.set_default_look_direction(scene.yaw);
        let presentation = select_presentation(&scene);
        log::info!("Loaded scene {:?}", scene);
        self.loaded_scene = Some(scene);

        match presentation {
            Presentation::Preview { preview, image } => {
                log::info!("Showing preview {} before {:?}", preview, image);
                self.render_ready
                    .arm(RenderReadyHandler::SwapPreview { image });
                self.host.renderer.set_photosphere(&preview, params);
            }
            Presentation::Video {
                video,
                fallback_image,
            } => self.enter_video_flow(&video, fallback_image.as_deref(), params),
            Presentation::Image { image } => self.load_image(&image, params),
            Presentation::Unusable => self.report(Failure::SceneUnusable),
        }
    }

    fn load_image(&mut self, image: &str, params: MediaParams) {
        self.render_ready.arm(RenderReadyHandler::HideLoading);
        self.host.renderer.set_photosphere(image, params);
    }

    fn on_render_ready(&mut self) {
        match self.render_ready.fire() {
            Some(RenderReadyHandler::HideLoading) => self.host.status.hide_loading(),
            Some(RenderReadyHandler::SwapPreview { image }) => {
                // Preview slot is empty by now; the full image gets a fresh one.
                self.host.status.hide_loading();
                match image {
                    Some(image) => {
                        let params = self.scene_params();
                        self.load_image(&image, params);
                    }
                    None => log::info!("No full image, keeping the preview"),
                }
            }
            None => log::debug!("Render backend ready with no listener"),
        }
    }

    fn enter_video_flow(&mut self, video: &str, fallback_image: Option<&str>, params: MediaParams) {
        match playback::video_entry(video, fallback_image, &self.caps) {
            VideoEntry::FallbackImage(image) => {
                log::info!("Video unsupported on this host, showing {} instead", image);
                self.playback.set_phase(VideoPhase::Unsupported);
                self.load_image(&image, params);
            }
            VideoEntry::Unsupported => {
                self.playback.set_phase(VideoPhase::Unsupported);
                self.report(Failure::UnsupportedMedia);
            }
            VideoEntry::Load(request) => match self.host.media.create_video(&request) {
                Ok(element) => {
                    self.video_ready.arm(());
                    self.video_error.arm(());
                    self.playback.attach(element);
                }
                Err(err) => {
                    log::warn!("Video element for {}: {}", request.source, err);
                    self.report(Failure::MediaLoad(err.to_string()));
                }
            },
        }
    }

    fn on_video_ready(&mut self) {
        if self.video_ready.fire().is_none() {
            log::debug!("Ignoring repeated video ready");
            return;
        }
        let Some(element) = self.playback.element().cloned() else {
            return;
        };
        element.borrow_mut().unlisten(MediaEvent::ReadyToPlayThrough);

        let params = self.scene_params();
        self.host.renderer.set_360_video(element.clone(), params);

        match playback::ready_action(&self.caps) {
            ReadyAction::DriveClock => {
                log::info!("Driving video clock from the render loop");
                self.host.status.hide_loading();
                self.playback.enable_forced_time_update();
                self.playback.set_phase(VideoPhase::Playing);
            }
            ReadyAction::Autoplay => {
                self.host.status.hide_loading();
                element.borrow_mut().play();
                self.playback.set_phase(VideoPhase::Playing);
            }
            ReadyAction::AwaitGesture => {
                self.report(Failure::GestureRequired);
                self.tap.arm(());
                self.host.gestures.listen();
                self.playback.set_phase(VideoPhase::AwaitingGesture);
            }
        }
    }

    fn on_video_failed(&mut self, detail: String) {
        if self.video_error.fire().is_none() {
            log::debug!("Ignoring repeated video error: {}", detail);
            return;
        }
        self.video_ready.disarm();
        if let Some(element) = self.playback.element() {
            element.borrow_mut().unlisten(MediaEvent::LoadError);
        }
        log::warn!("Video load error: {}", detail);
        self.report(Failure::MediaLoad(detail));
    }

    fn on_tap(&mut self) {
        if self.tap.fire().is_none() {
            return;
        }
        self.host.gestures.unlisten();
        self.host.status.dismiss_failure();
        if let Some(element) = self.playback.element() {
            element.borrow_mut().play();
        }
        self.playback.set_phase(VideoPhase::Playing);
    }

    fn scene_params(&self) -> MediaParams {
        self.loaded_scene
            .as_ref()
            .map(SceneDescriptor::media_params)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
