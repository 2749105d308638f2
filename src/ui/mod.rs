//! Loading indicator, error surface and the other user-facing seams.

pub const DEFAULT_ERROR_TITLE: &str = "Error";

pub trait LoadingIndicator {
    fn hide(&mut self);
}

/// Message surface with a title slot, a message slot and a visibility toggle.
pub trait ErrorSurface {
    fn set_visible(&mut self, visible: bool);
    fn set_title(&mut self, title: &str);
    fn set_message(&mut self, message: &str);
}

/// Document-wide tap source. Taps are delivered as `HostEvent::Tap` only
/// while listening.
pub trait GestureChannel {
    fn listen(&mut self);
    fn unlisten(&mut self);
}

/// Frame statistics display.
pub trait PerfOverlay {
    fn show(&mut self);
    fn begin(&mut self);
    fn end(&mut self);
}

/// Overlay used when the host has nothing to show statistics on.
#[derive(Debug, Default)]
pub struct NoOverlay;

impl PerfOverlay for NoOverlay {
    fn show(&mut self) {}
    fn begin(&mut self) {}
    fn end(&mut self) {}
}

/// The single channel failures and prompts reach the user through.
///
/// Fatal errors and calls to action share the surface and differ only by
/// title.
pub struct StatusBridge {
    loading: Box<dyn LoadingIndicator>,
    errors: Box<dyn ErrorSurface>,
}

impl StatusBridge {
    pub fn new(loading: Box<dyn LoadingIndicator>, errors: Box<dyn ErrorSurface>) -> Self {
        Self { loading, errors }
    }

    pub fn hide_loading(&mut self) {
        self.loading.hide();
    }

    /// Hides the loading indicator, then shows `message` under `title`
    /// (`"Error"` when absent). Showing again replaces the previous text.
    pub fn report_failure(&mut self, message: &str, title: Option<&str>) {
        self.loading.hide();
        self.errors.set_visible(true);
        self.errors.set_message(message);
        self.errors.set_title(title.unwrap_or(DEFAULT_ERROR_TITLE));
    }

    pub fn dismiss_failure(&mut self) {
        self.errors.set_visible(false);
    }
}
