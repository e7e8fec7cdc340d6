use std::path::PathBuf;

use crate::scenes;
use crate::{Result, VisualTestError};

/// Configuration for capturing a scene
pub struct CaptureConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Path where the PNG will be saved
    pub output_path: PathBuf,
}

/// Render a scene in-process and save it as PNG
pub fn capture_scene(config: &CaptureConfig) -> Result<()> {
    let scene = scenes::find(&config.scene_name)
        .ok_or_else(|| VisualTestError::UnknownScene(config.scene_name.clone()))?;

    let canvas = scenes::render(scene)?;
    if let Some(parent) = config.output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    canvas.save(&config.output_path)?;

    log::debug!(
        "captured {} ({}x{}) to {}",
        config.scene_name,
        canvas.width(),
        canvas.height(),
        config.output_path.display()
    );
    Ok(())
}
