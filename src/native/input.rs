use crate::ui::GestureChannel;
use std::cell::Cell;
use std::rc::Rc;
use winit::event::{ElementState, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Tap,
    Quit,
}

impl InputAction {
    pub fn classify(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => Self::from_key(event.physical_key, event.state),
            WindowEvent::MouseInput { state, .. } => Self::from_pointer(*state),
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Ended => Some(Self::Tap),
            _ => None,
        }
    }

    pub fn from_key(key: PhysicalKey, state: ElementState) -> Option<Self> {
        if state != ElementState::Pressed {
            return None;
        }
        match key {
            PhysicalKey::Code(KeyCode::Escape) => Some(Self::Quit),
            PhysicalKey::Code(KeyCode::Space) | PhysicalKey::Code(KeyCode::Enter) => Some(Self::Tap),
            _ => None,
        }
    }

    /// A tap is a completed click, so only releases count.
    pub fn from_pointer(state: ElementState) -> Option<Self> {
        match state {
            ElementState::Released => Some(Self::Tap),
            ElementState::Pressed => None,
        }
    }
}

/// Gesture channel for the window: the host forwards taps only while armed.
#[derive(Debug, Clone, Default)]
pub struct TapGate(Rc<Cell<bool>>);

impl TapGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.0.get()
    }
}

impl GestureChannel for TapGate {
    fn listen(&mut self) {
        log::debug!("Listening for tap");
        self.0.set(true);
    }

    fn unlisten(&mut self) {
        self.0.set(false);
    }
}
