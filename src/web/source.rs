use super::probe::query_params;
use crate::app::{EventSink, HostEvent};
use crate::scene::{SceneDescriptor, SceneSource};
use web_sys::Window;

/// Scene described by the page query string (`?image=…&is_stereo=1`).
pub struct QuerySceneSource<S> {
    window: Window,
    events: S,
    requested: bool,
}

impl<S: EventSink> QuerySceneSource<S> {
    pub fn new(window: Window, events: S) -> Self {
        Self {
            window,
            events,
            requested: false,
        }
    }
}

impl<S: EventSink> SceneSource for QuerySceneSource<S> {
    fn load_scene(&mut self) {
        if std::mem::replace(&mut self.requested, true) {
            log::warn!("Scene already requested");
            return;
        }
        let Some(params) = query_params(&self.window) else {
            self.events
                .emit(HostEvent::SceneFailed("could not read page URL".to_string()));
            return;
        };
        let scene = SceneDescriptor::from_params(|name| params.get(name));
        self.events.emit(HostEvent::SceneLoaded(scene));
    }
}
