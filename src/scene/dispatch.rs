use super::SceneDescriptor;

/// The single presentation path chosen for a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Low resolution preview first, swapped for the full image once ready.
    /// Without an image the preview stays up.
    Preview {
        preview: String,
        image: Option<String>,
    },
    Video {
        video: String,
        fallback_image: Option<String>,
    },
    Image { image: String },
    /// Nothing displayable in the descriptor.
    Unusable,
}

/// Priority is `preview > video > image`, whatever else the scene names.
pub fn select_presentation(scene: &SceneDescriptor) -> Presentation {
    if let Some(preview) = &scene.preview {
        if scene.image.is_none() {
            log::warn!("Scene preview '{}' has no full image to swap to", preview);
        }
        return Presentation::Preview {
            preview: preview.clone(),
            image: scene.image.clone(),
        };
    }
    if let Some(video) = &scene.video {
        return Presentation::Video {
            video: video.clone(),
            fallback_image: scene.image.clone(),
        };
    }
    match &scene.image {
        Some(image) => Presentation::Image {
            image: image.clone(),
        },
        None => Presentation::Unusable,
    }
}
