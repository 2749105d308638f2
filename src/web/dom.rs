use super::bindings;
use crate::app::{EventSink, FrameStats, HostEvent};
use crate::ui::{ErrorSurface, GestureChannel, LoadingIndicator, PerfOverlay};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Performance};

pub struct PageLoading(pub bindings::LoadingIndicator);

impl LoadingIndicator for PageLoading {
    fn hide(&mut self) {
        self.0.hide();
    }
}

/// The page's `#error` box with `.title` and `.message` children, shown by
/// the `visible` class.
pub struct DomErrorSurface {
    root: Option<Element>,
}

impl DomErrorSurface {
    pub fn new(document: &Document) -> Self {
        let root = document.query_selector("#error").ok().flatten();
        if root.is_none() {
            log::warn!("Page has no #error element; failures only go to the console");
        }
        Self { root }
    }

    fn set_child_text(&self, selector: &str, text: &str) {
        let child = self
            .root
            .as_ref()
            .and_then(|root| root.query_selector(selector).ok().flatten());
        if let Some(child) = child {
            child.set_text_content(Some(text));
        }
    }
}

impl ErrorSurface for DomErrorSurface {
    fn set_visible(&mut self, visible: bool) {
        let Some(root) = &self.root else {
            return;
        };
        let classes = root.class_list();
        let result = if visible {
            classes.add_1("visible")
        } else {
            classes.remove_1("visible")
        };
        if let Err(err) = result {
            log::warn!("Failed to toggle error box: {:?}", err);
        }
    }

    fn set_title(&mut self, title: &str) {
        self.set_child_text(".title", title);
    }

    fn set_message(&mut self, message: &str) {
        log::info!("Error box: {}", message);
        self.set_child_text(".message", message);
    }
}

type TapListener = Closure<dyn FnMut(Event)>;

/// `touchend` anywhere on the page body.
pub struct BodyTapChannel<S> {
    body: Option<HtmlElement>,
    events: S,
    listener: Option<TapListener>,
    retired: Vec<TapListener>,
}

impl<S> BodyTapChannel<S>
where
    S: EventSink + Clone + 'static,
{
    pub fn new(document: &Document, events: S) -> Self {
        Self {
            body: document.body(),
            events,
            listener: None,
            retired: Vec::new(),
        }
    }
}

impl<S> GestureChannel for BodyTapChannel<S>
where
    S: EventSink + Clone + 'static,
{
    fn listen(&mut self) {
        let Some(body) = &self.body else {
            log::warn!("No document body to listen for taps on");
            return;
        };
        if self.listener.is_some() {
            return;
        }
        let events = self.events.clone();
        let listener = Closure::wrap(
            Box::new(move |_event: Event| events.emit(HostEvent::Tap)) as Box<dyn FnMut(_)>
        );
        if let Err(err) =
            body.add_event_listener_with_callback("touchend", listener.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for taps: {:?}", err);
            return;
        }
        self.listener = Some(listener);
    }

    fn unlisten(&mut self) {
        let (Some(body), Some(listener)) = (&self.body, self.listener.take()) else {
            return;
        };
        if let Err(err) =
            body.remove_event_listener_with_callback("touchend", listener.as_ref().unchecked_ref())
        {
            log::warn!("Failed to stop listening for taps: {:?}", err);
        }
        self.retired.push(listener);
    }
}

/// Bottom-left frame statistics box.
pub struct DomStatsOverlay {
    document: Document,
    performance: Option<Performance>,
    element: Option<HtmlElement>,
    stats: FrameStats,
}

impl DomStatsOverlay {
    pub fn new(document: Document, performance: Option<Performance>) -> Self {
        Self {
            document,
            performance,
            element: None,
            stats: FrameStats::new(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.performance.as_ref().map(Performance::now).unwrap_or(0.0)
    }

    fn create_element(&self) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = self.document.create_element("div")?.unchecked_into();
        let style = element.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", "0px")?;
        style.set_property("bottom", "0px")?;
        style.set_property("padding", "2px 6px")?;
        style.set_property("font", "11px monospace")?;
        style.set_property("color", "#0f0")?;
        style.set_property("background", "rgba(0, 0, 0, 0.6)")?;
        element.set_text_content(Some("-- fps"));
        if let Some(body) = self.document.body() {
            body.append_child(&element)?;
        }
        Ok(element)
    }
}

impl PerfOverlay for DomStatsOverlay {
    fn show(&mut self) {
        match self.create_element() {
            Ok(element) => self.element = Some(element),
            Err(err) => log::warn!("Failed to create stats overlay: {:?}", err),
        }
    }

    fn begin(&mut self) {
        let now = self.now_ms();
        self.stats.begin(now);
    }

    fn end(&mut self) {
        let now = self.now_ms();
        if let (Some(summary), Some(element)) = (self.stats.end(now), &self.element) {
            element.set_text_content(Some(&summary.to_string()));
        }
    }
}
