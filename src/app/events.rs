use crate::scene::SceneDescriptor;
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};

/// Everything the host delivers to the controller, in delivery order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    SceneLoaded(SceneDescriptor),
    SceneFailed(String),
    RenderReady,
    RenderFailed(String),
    VideoReady,
    VideoFailed(String),
    Tap,
    /// Animation frame at a monotonic millisecond timestamp.
    Frame(f64),
}

/// Somewhere host adapters can post events for later delivery.
pub trait EventSink {
    fn emit(&self, event: HostEvent);
}

pub type HostEventSender = Sender<HostEvent>;
pub type HostEventReceiver = Receiver<HostEvent>;

pub fn event_channel() -> (HostEventSender, HostEventReceiver) {
    mpsc::channel()
}

impl EventSink for Sender<HostEvent> {
    fn emit(&self, event: HostEvent) {
        if self.send(event).is_err() {
            log::debug!("Host event receiver dropped");
        }
    }
}

/// Single-fire handler slot.
///
/// `fire` empties the slot, so a handler runs at most once per `arm`
/// regardless of how often the host repeats the event.
#[derive(Debug)]
pub struct OneShot<H> {
    handler: Option<H>,
}

impl<H> Default for OneShot<H> {
    fn default() -> Self {
        Self { handler: None }
    }
}

impl<H> OneShot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with `handler`, returning whatever was armed before.
    pub fn arm(&mut self, handler: H) -> Option<H> {
        self.handler.replace(handler)
    }

    pub fn disarm(&mut self) -> Option<H> {
        self.handler.take()
    }

    pub fn fire(&mut self) -> Option<H> {
        self.handler.take()
    }

    pub fn is_armed(&self) -> bool {
        self.handler.is_some()
    }

    pub fn peek(&self) -> Option<&H> {
        self.handler.as_ref()
    }
}
