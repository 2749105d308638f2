use crate::app::FrameStats;
use crate::ui::{ErrorSurface, LoadingIndicator, PerfOverlay};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Everything the window title shows, in one place.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub loading: bool,
    pub error_visible: bool,
    pub error_title: String,
    pub error_message: String,
    pub stats: Option<String>,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            loading: true,
            error_visible: false,
            error_title: String::new(),
            error_message: String::new(),
            stats: None,
        }
    }
}

impl StatusLine {
    /// Window title built from `base` plus whatever status is showing.
    pub fn compose(&self, base: &str) -> String {
        let mut title = base.to_string();
        if self.error_visible {
            title.push_str(&format!(" - {}: {}", self.error_title, self.error_message));
        } else if self.loading {
            title.push_str(" - Loading...");
        }
        if let Some(stats) = &self.stats {
            title.push_str(&format!(" [{}]", stats));
        }
        title
    }
}

pub type SharedStatus = Rc<RefCell<StatusLine>>;

pub struct TitleLoading(pub SharedStatus);

impl LoadingIndicator for TitleLoading {
    fn hide(&mut self) {
        self.0.borrow_mut().loading = false;
    }
}

pub struct TitleErrors(pub SharedStatus);

impl ErrorSurface for TitleErrors {
    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().error_visible = visible;
    }

    fn set_title(&mut self, title: &str) {
        self.0.borrow_mut().error_title = title.to_string();
    }

    fn set_message(&mut self, message: &str) {
        self.0.borrow_mut().error_message = message.to_string();
    }
}

/// Frame statistics appended to the window title.
pub struct TitleOverlay {
    status: SharedStatus,
    stats: FrameStats,
    origin: Instant,
}

impl TitleOverlay {
    pub fn new(status: SharedStatus, origin: Instant) -> Self {
        Self {
            status,
            stats: FrameStats::new(),
            origin,
        }
    }

    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl PerfOverlay for TitleOverlay {
    fn show(&mut self) {
        self.status.borrow_mut().stats = Some("-- fps".to_string());
    }

    fn begin(&mut self) {
        let now = self.now_ms();
        self.stats.begin(now);
    }

    fn end(&mut self) {
        let now = self.now_ms();
        if let Some(summary) = self.stats.end(now) {
            log::debug!("{}", summary);
            self.status.borrow_mut().stats = Some(summary.to_string());
        }
    }
}
