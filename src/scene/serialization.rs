use crate::scene::SceneDescriptor;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SerializationError>;

pub fn save_scene_to_file(scene: &SceneDescriptor, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(scene)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a scene file. Relative media paths are resolved against the
/// directory holding the scene file; URLs are left alone.
pub fn load_scene_from_file(path: &Path) -> Result<SceneDescriptor> {
    let json = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&json)?;
    if let Some(base) = path.parent() {
        for field in [&mut scene.preview, &mut scene.image, &mut scene.video] {
            if let Some(value) = field.as_mut() {
                *value = resolve_media_path(base, value);
            }
        }
    }
    Ok(scene)
}

pub fn load_scene_from_str(json: &str) -> Result<SceneDescriptor> {
    let scene: SceneDescriptor = serde_json::from_str(json)?;
    Ok(scene)
}

fn resolve_media_path(base: &Path, value: &str) -> String {
    if value.contains("://") || Path::new(value).is_absolute() || base.as_os_str().is_empty() {
        return value.to_string();
    }
    base.join(value).display().to_string()
}
