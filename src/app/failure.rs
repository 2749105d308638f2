use crate::ui::DEFAULT_ERROR_TITLE;

pub const PLAY_PROMPT_TITLE: &str = "Play";

/// Everything that ends up on the error surface.
///
/// The display text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("WebGL not supported.")]
    UnsupportedEnvironment,
    #[error("Loader: {0}")]
    SceneLoad(String),
    #[error("Scene failed to load")]
    SceneUnusable,
    #[error("Render: {0}")]
    RenderBackend(String),
    /// Detail is logged, never shown.
    #[error("Video load error")]
    MediaLoad(String),
    #[error("Video is not supported on IE11.")]
    UnsupportedMedia,
    /// Not an error: autoplay is blocked until the user taps.
    #[error("Tap to start video")]
    GestureRequired,
}

impl Failure {
    pub fn title(&self) -> &'static str {
        match self {
            Failure::GestureRequired => PLAY_PROMPT_TITLE,
            _ => DEFAULT_ERROR_TITLE,
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self, Failure::GestureRequired)
    }
}
