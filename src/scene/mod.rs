pub mod dispatch;
pub mod serialization;

pub use dispatch::{select_presentation, Presentation};

use crate::render::MediaParams;

/// Scene description - what gets loaded once per session
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneDescriptor {
    /// Default look direction in degrees.
    #[serde(alias = "start_yaw")]
    pub yaw: f64,
    #[serde(alias = "isStereo")]
    pub is_stereo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl SceneDescriptor {
    pub fn image(path: &str) -> Self {
        Self {
            image: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn video(path: &str) -> Self {
        Self {
            video: Some(path.to_string()),
            ..Self::default()
        }
    }

    /// A scene is usable once it names a full image or a video.
    pub fn is_complete(&self) -> bool {
        self.image.is_some() || self.video.is_some()
    }

    pub fn media_params(&self) -> MediaParams {
        MediaParams {
            is_stereo: self.is_stereo,
        }
    }

    /// Build a descriptor from `key=value` style parameters
    /// (`image`, `preview`, `video`, `is_stereo`, `yaw` / `start_yaw`).
    pub fn from_params<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let yaw = non_empty("yaw")
            .or_else(|| non_empty("start_yaw"))
            .and_then(|value| match value.trim().parse::<f64>() {
                Ok(yaw) if yaw.is_finite() => Some(yaw),
                _ => {
                    log::warn!("Ignoring invalid yaw parameter '{}'", value);
                    None
                }
            })
            .unwrap_or(0.0);
        Self {
            yaw,
            is_stereo: non_empty("is_stereo")
                .map(|value| matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(false),
            preview: non_empty("preview"),
            image: non_empty("image"),
            video: non_empty("video"),
        }
    }
}

/// Produces one scene descriptor (or one failure) per session.
///
/// Results arrive later as `HostEvent::SceneLoaded` / `HostEvent::SceneFailed`.
pub trait SceneSource {
    fn load_scene(&mut self);
}
