//! Snapshot tests for hero scenes.
//!
//! Scenes render in-process through `guido_hero`'s host and software
//! renderer, then compare against the PNG references committed under
//! `references/` with SSIM. Set `UPDATE_REFERENCES` to re-record them.

mod capture;
mod compare;
pub mod scenes;

pub use capture::{capture_scene, CaptureConfig};
pub use compare::{compare_images, diff_image, generate_diff_image, CompareResult};

use std::path::PathBuf;

use guido_hero::renderer::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
    #[error("Failed to render scene: {0}")]
    Render(#[from] RenderError),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            scene_name: String::new(),
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    pub captured_path: PathBuf,
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

pub fn reference_path(scene_name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", scene_name))
}

/// Directory for captured and diff images
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

pub fn captured_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scene_name))
}

pub fn diff_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scene_name))
}

/// Run a visual regression test
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let ref_path = reference_path(&config.scene_name);
    let cap_path = captured_path(&config.scene_name);

    if !ref_path.exists() {
        return Err(VisualTestError::ReferenceNotFound(ref_path));
    }

    capture_scene(&CaptureConfig {
        scene_name: config.scene_name.clone(),
        output_path: cap_path.clone(),
    })?;

    let compare_result = compare_images(&ref_path, &cap_path)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(&config.scene_name);
        generate_diff_image(&ref_path, &cap_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Re-render the reference image for a scene
pub fn update_reference(scene_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;
    let ref_path = reference_path(scene_name);
    capture_scene(&CaptureConfig {
        scene_name: scene_name.to_string(),
        output_path: ref_path.clone(),
    })?;

    log::info!("updated reference {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_has_a_reference() {
        for scene in scenes::SCENES {
            let path = reference_path(scene.name);
            assert!(path.exists(), "missing reference {}", path.display());
        }
    }

    #[test]
    fn test_missing_reference_is_an_error() {
        let err = run_visual_test(&VisualTestConfig {
            scene_name: "never_recorded".to_string(),
            ..VisualTestConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(
            err,
            VisualTestError::ReferenceNotFound(path) if path == reference_path("never_recorded")
        ));
        assert!(!reference_path("never_recorded").exists());
    }
}
