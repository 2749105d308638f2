use super::bindings::PhotosphereRenderer;
use super::video::WebVideo;
use crate::app::{EventSink, HostEvent};
use crate::render::{MediaParams, RenderBackend, SharedVideo};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// [`RenderBackend`] over the page's JS renderer.
pub struct WebRenderer {
    renderer: PhotosphereRenderer,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

impl WebRenderer {
    pub fn new<S>(renderer: PhotosphereRenderer, events: S) -> Self
    where
        S: EventSink + Clone + 'static,
    {
        let load_events = events.clone();
        let on_load = Closure::wrap(
            Box::new(move || load_events.emit(HostEvent::RenderReady)) as Box<dyn FnMut()>
        );
        let on_error = Closure::wrap(Box::new(move |message: JsValue| {
            let message = message
                .as_string()
                .unwrap_or_else(|| format!("{:?}", message));
            events.emit(HostEvent::RenderFailed(message));
        }) as Box<dyn FnMut(_)>);
        renderer.on("load", on_load.as_ref().unchecked_ref());
        renderer.on("error", on_error.as_ref().unchecked_ref());
        Self {
            renderer,
            _on_load: on_load,
            _on_error: on_error,
        }
    }
}

pub(crate) fn params_object(params: MediaParams) -> JsValue {
    let object = Object::new();
    if let Err(err) = Reflect::set(
        &object,
        &JsValue::from_str("isStereo"),
        &JsValue::from_bool(params.is_stereo),
    ) {
        log::warn!("Failed to build media params: {:?}", err);
    }
    object.into()
}

impl RenderBackend for WebRenderer {
    fn set_photosphere(&mut self, source: &str, params: MediaParams) {
        self.renderer.set_photosphere(source, &params_object(params));
    }

    fn set_360_video(&mut self, video: SharedVideo, params: MediaParams) {
        let video = video.borrow();
        match video.as_any().downcast_ref::<WebVideo>() {
            Some(web_video) => self
                .renderer
                .set_360_video(web_video.element(), &params_object(params)),
            None => log::error!("{} is not a page video element", video.source()),
        }
    }

    fn set_default_look_direction(&mut self, yaw_degrees: f64) {
        self.renderer.set_default_look_direction(yaw_degrees);
    }

    fn render(&mut self, timestamp_ms: f64) {
        self.renderer.render(timestamp_ms);
    }
}
