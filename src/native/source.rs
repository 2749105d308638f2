use crate::app::{EventSink, HostEvent};
use crate::scene::serialization::load_scene_from_file;
use crate::scene::{SceneDescriptor, SceneSource};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneLocation {
    File(PathBuf),
    Inline(SceneDescriptor),
}

/// Reads the scene on a worker thread and posts the outcome.
pub struct NativeSceneSource<S> {
    location: Option<SceneLocation>,
    events: S,
}

impl<S> NativeSceneSource<S>
where
    S: EventSink + Clone + Send + 'static,
{
    pub fn new(location: SceneLocation, events: S) -> Self {
        Self {
            location: Some(location),
            events,
        }
    }
}

impl<S> SceneSource for NativeSceneSource<S>
where
    S: EventSink + Clone + Send + 'static,
{
    fn load_scene(&mut self) {
        let Some(location) = self.location.take() else {
            log::warn!("Scene already requested");
            return;
        };
        match location {
            SceneLocation::Inline(scene) => self.events.emit(HostEvent::SceneLoaded(scene)),
            SceneLocation::File(path) => {
                let events = self.events.clone();
                std::thread::spawn(move || {
                    log::info!("Loading scene: {}", path.display());
                    let event = match load_scene_from_file(&path) {
                        Ok(scene) => HostEvent::SceneLoaded(scene),
                        Err(err) => HostEvent::SceneFailed(format!("{}: {}", path.display(), err)),
                    };
                    events.emit(event);
                });
            }
        }
    }
}
