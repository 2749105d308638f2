use super::{Controller, EventSink, HostEvent, Startup};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Single-threaded event queue in front of a [`Controller`].
///
/// Hosts whose callbacks can fire while the controller is mid-handler (DOM
/// listeners, synchronous renderer callbacks) post here instead of calling
/// the controller directly. Events are handled strictly one at a time in
/// posting order; a post made from inside a handler is picked up by the
/// drain loop already running.
#[derive(Default)]
pub struct Session {
    controller: RefCell<Option<Controller>>,
    queue: RefCell<VecDeque<HostEvent>>,
}

impl Session {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(self: &Rc<Self>) -> SessionEvents {
        SessionEvents(Rc::downgrade(self))
    }

    /// Starts `controller`, installs it and handles whatever it queued while
    /// starting.
    pub fn start(&self, mut controller: Controller) -> Startup {
        let startup = controller.start();
        *self.controller.borrow_mut() = Some(controller);
        self.drain();
        startup
    }

    pub fn post(&self, event: HostEvent) {
        self.queue.borrow_mut().push_back(event);
        self.drain();
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn drain(&self) {
        loop {
            let Ok(mut slot) = self.controller.try_borrow_mut() else {
                return;
            };
            let Some(controller) = slot.as_mut() else {
                return;
            };
            let Some(event) = self.queue.borrow_mut().pop_front() else {
                return;
            };
            controller.handle(event);
        }
    }
}

/// [`EventSink`] that posts into a [`Session`] without keeping it alive.
#[derive(Clone)]
pub struct SessionEvents(Weak<Session>);

impl EventSink for SessionEvents {
    fn emit(&self, event: HostEvent) {
        match self.0.upgrade() {
            Some(session) => session.post(event),
            None => log::debug!("Session gone, dropping {:?}", event),
        }
    }
}
