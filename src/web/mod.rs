//! Browser host built on wasm-bindgen and web-sys.
//!
//! The page supplies the WebGL renderer and the loading spinner as JS
//! objects; everything else (capability probing, the query-string scene,
//! `<video>` handling, the `#error` box, taps, stats) is done here. DOM
//! callbacks post into a [`Session`] so the controller never re-enters.

mod bindings;
mod dom;
mod probe;
mod renderer;
mod source;
mod video;


pub use bindings::{LoadingIndicator, PhotosphereRenderer};
pub use dom::{BodyTapChannel, DomErrorSurface, DomStatsOverlay, PageLoading};
pub use probe::WebProbe;
pub use renderer::WebRenderer;
pub use source::QuerySceneSource;
pub use video::{WebMedia, WebVideo};

use crate::app::{Collaborators, Controller, HostEvent, LoopHandle, Session, Startup};
use crate::capability::Capabilities;
use crate::ui::StatusBridge;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already installed".into());
    }
}

/// Starts a viewing session on the current page.
#[wasm_bindgen(js_name = startViewer)]
pub fn start_viewer(
    renderer: PhotosphereRenderer,
    loading: LoadingIndicator,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let caps = Capabilities::resolve(&WebProbe::new(window.clone()));
    let session = Session::new();
    let events = session.events();

    let host = Collaborators {
        scene_source: Box::new(QuerySceneSource::new(window.clone(), events.clone())),
        renderer: Box::new(WebRenderer::new(renderer, events.clone())),
        media: Box::new(WebMedia::new(document.clone(), events.clone())),
        status: StatusBridge::new(
            Box::new(PageLoading(loading)),
            Box::new(DomErrorSurface::new(&document)),
        ),
        gestures: Box::new(BodyTapChannel::new(&document, events)),
        overlay: Box::new(DomStatsOverlay::new(document, window.performance())),
    };
    let controller = Controller::new(caps, host);
    let loop_handle = controller.loop_handle();

    if session.start(controller) == Startup::Aborted {
        return Ok(());
    }
    start_render_loop(window, session, loop_handle)
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` loop that reschedules itself until the session's
/// loop handle is stopped.
fn start_render_loop(
    window: Window,
    session: Rc<Session>,
    loop_handle: LoopHandle,
) -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let raf_window = window.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
        session.post(HostEvent::Frame(time));
        if !loop_handle.is_running() {
            log::info!("Render loop stopped");
            return;
        }
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = raf_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
