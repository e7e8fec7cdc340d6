use std::path::Path;

use image::{Rgba, RgbaImage};
use image_compare::Algorithm;

use crate::{Result, VisualTestError};

/// Channel difference below which two pixels count as equal in diffs.
const DIFF_TOLERANCE: u8 = 10;

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
}

/// SSIM similarity of two PNG files.
pub fn compare_images(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let reference = image::open(reference)?.to_rgb8();
    let captured = image::open(captured)?.to_rgb8();

    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "image dimensions don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &reference, &captured)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    Ok(CompareResult {
        similarity: result.score,
    })
}

/// Red where the images differ, a dimmed copy of `captured` elsewhere.
pub fn diff_image(reference: &RgbaImage, captured: &RgbaImage) -> RgbaImage {
    let (width, height) = captured.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let cap = captured.get_pixel(x, y);
        let diff = if x < reference.width() && y < reference.height() {
            pixel_difference(reference.get_pixel(x, y), cap)
        } else {
            u8::MAX
        };
        if diff > DIFF_TOLERANCE {
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([cap[0] / 3, cap[1] / 3, cap[2] / 3, 255])
        }
    })
}

/// Write the diff of two PNG files to `output`.
pub fn generate_diff_image(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    diff_image(&reference, &captured).save(output)?;
    Ok(())
}

/// Largest per-channel difference, alpha ignored
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    (0..3).map(|c| a[c].abs_diff(b[c])).max().unwrap_or(0)
}
