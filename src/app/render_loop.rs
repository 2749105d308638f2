use std::cell::Cell;
use std::rc::Rc;

/// Whether the host should schedule another frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Stop hook for the render loop.
///
/// The loop runs for the whole session unless some clone of this handle is
/// stopped; hosts check [`LoopHandle::is_running`] before rescheduling.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    stopped: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        if !self.stopped.replace(true) {
            log::info!("Render loop stop requested");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }

    pub fn control(&self) -> LoopControl {
        if self.is_running() {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoopControl, LoopHandle};

    #[test]
    fn runs_until_any_clone_stops() {
        let handle = LoopHandle::new();
        let other = handle.clone();
        assert_eq!(handle.control(), LoopControl::Continue);
        other.stop();
        assert!(!handle.is_running());
        assert_eq!(handle.control(), LoopControl::Stop);
        other.stop();
        assert!(!other.is_running());
    }
}
