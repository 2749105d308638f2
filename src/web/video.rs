use crate::app::{EventSink, HostEvent};
use crate::render::{MediaError, MediaEvent, MediaFactory, SharedVideo, VideoElement, VideoRequest};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlVideoElement};

type Listener = Closure<dyn FnMut(Event)>;

fn dom_event_name(event: MediaEvent) -> &'static str {
    match event {
        MediaEvent::ReadyToPlayThrough => "canplaythrough",
        MediaEvent::LoadError => "error",
    }
}

pub struct WebVideo {
    element: HtmlVideoElement,
    source: String,
    ready: Option<Listener>,
    error: Option<Listener>,
    /// Removed listeners stay alive until the video goes away; the browser
    /// may be calling one of them while we unlisten.
    retired: Vec<Listener>,
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl WebVideo {
    pub fn element(&self) -> &HtmlVideoElement {
        &self.element
    }
}

impl VideoElement for WebVideo {
    fn source(&self) -> &str {
        &self.source
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn play(&mut self) {
        match self.element.play() {
            // Blocked autoplay rejects the promise rather than throwing.
            Ok(promise) => {
                let _ = promise.catch(&self.on_play_rejected);
            }
            Err(err) => log::warn!("play() failed for {}: {:?}", self.source, err),
        }
    }

    fn unlisten(&mut self, event: MediaEvent) {
        let slot = match event {
            MediaEvent::ReadyToPlayThrough => &mut self.ready,
            MediaEvent::LoadError => &mut self.error,
        };
        let Some(listener) = slot.take() else {
            return;
        };
        if let Err(err) = self.element.remove_event_listener_with_callback(
            dom_event_name(event),
            listener.as_ref().unchecked_ref(),
        ) {
            log::warn!("Failed to remove {} listener: {:?}", dom_event_name(event), err);
        }
        self.retired.push(listener);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct WebMedia<S> {
    document: Document,
    events: S,
}

impl<S> WebMedia<S>
where
    S: EventSink + Clone + 'static,
{
    pub fn new(document: Document, events: S) -> Self {
        Self { document, events }
    }

    fn listen(
        &self,
        element: &HtmlVideoElement,
        event: MediaEvent,
        mut callback: impl FnMut() + 'static,
    ) -> Result<Listener, MediaError> {
        let listener = Closure::wrap(Box::new(move |_event: Event| callback()) as Box<dyn FnMut(_)>);
        element
            .add_event_listener_with_callback(dom_event_name(event), listener.as_ref().unchecked_ref())
            .map_err(|err| MediaError::Create(format!("{:?}", err)))?;
        Ok(listener)
    }
}

impl<S> MediaFactory for WebMedia<S>
where
    S: EventSink + Clone + 'static,
{
    fn create_video(&mut self, request: &VideoRequest) -> Result<SharedVideo, MediaError> {
        let element: HtmlVideoElement = self
            .document
            .create_element("video")
            .map_err(|err| MediaError::Create(format!("{:?}", err)))?
            .unchecked_into();
        element.set_src(&request.source);
        element.set_loop(request.looping);
        element.set_cross_origin(Some(request.cross_origin.as_str()));
        element
            .set_attribute("playsinline", "")
            .map_err(|err| MediaError::Create(format!("{:?}", err)))?;

        let events = self.events.clone();
        let ready = self.listen(&element, MediaEvent::ReadyToPlayThrough, move || {
            events.emit(HostEvent::VideoReady)
        })?;
        let events = self.events.clone();
        let failing = element.clone();
        let error = self.listen(&element, MediaEvent::LoadError, move || {
            let detail = match failing.error() {
                Some(err) => format!("{} (media error code {})", failing.src(), err.code()),
                None => failing.src(),
            };
            events.emit(HostEvent::VideoFailed(detail));
        })?;

        let source = request.source.clone();
        let rejected_source = source.clone();
        let on_play_rejected = Closure::wrap(Box::new(move |reason: JsValue| {
            log::warn!("play() rejected for {}: {:?}", rejected_source, reason);
        }) as Box<dyn FnMut(JsValue)>);

        element.load();
        log::info!("Loading video {}", source);

        Ok(Rc::new(RefCell::new(WebVideo {
            element,
            source,
            ready: Some(ready),
            error: Some(error),
            retired: Vec::new(),
            on_play_rejected,
        })))
    }
}
