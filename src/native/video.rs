use crate::app::{EventSink, HostEvent};
use crate::render::{MediaError, MediaEvent, MediaFactory, SharedVideo, VideoElement, VideoRequest};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Video handle for hosts without a decoder.
///
/// Tracks the position the controller drives, but never becomes ready to
/// play through. Its only event is the load error posted at creation.
#[derive(Debug)]
pub struct NativeVideo {
    source: String,
    current_time: f64,
}

impl NativeVideo {
    pub fn new(request: &VideoRequest) -> Self {
        Self {
            source: request.source.clone(),
            current_time: 0.0,
        }
    }
}

impl VideoElement for NativeVideo {
    fn source(&self) -> &str {
        &self.source
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        f64::NAN
    }

    fn play(&mut self) {
        log::warn!("Cannot play {}: no video decoder", self.source);
    }

    fn unlisten(&mut self, event: MediaEvent) {
        log::debug!("{:?} listener dropped for {}", event, self.source);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct NativeMedia<S> {
    events: S,
}

impl<S: EventSink> NativeMedia<S> {
    pub fn new(events: S) -> Self {
        Self { events }
    }
}

impl<S: EventSink> MediaFactory for NativeMedia<S> {
    fn create_video(&mut self, request: &VideoRequest) -> Result<SharedVideo, MediaError> {
        log::info!(
            "Creating video element for {} (loop: {}, crossOrigin: {})",
            request.source,
            request.looping,
            request.cross_origin.as_str()
        );
        let video = Rc::new(RefCell::new(NativeVideo::new(request)));
        // No decoder here, so loading fails as soon as the queue is drained.
        self.events.emit(HostEvent::VideoFailed(format!(
            "no video decoder available on this host for {}",
            request.source
        )));
        Ok(video)
    }
}
