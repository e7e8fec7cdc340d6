//! Decoded image pixels, keyed by source.

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use crate::widgets::ImageSource;

use super::{RenderError, Result};

#[derive(Default)]
pub struct ImageCache {
    images: HashMap<ImageSource, RgbaImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded pixels for `source`, or `None` for remote sources.
    pub fn load(&mut self, source: &ImageSource) -> Result<Option<&RgbaImage>> {
        if source.is_remote() {
            return Ok(None);
        }
        if !self.images.contains_key(source) {
            let decoded = decode(source)?;
            log::debug!(
                "decoded {source} ({}x{})",
                decoded.width(),
                decoded.height()
            );
            self.images.insert(source.clone(), decoded);
        }
        Ok(self.images.get(source))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn decode(source: &ImageSource) -> Result<RgbaImage> {
    match source {
        ImageSource::Uri(uri) => Err(RenderError::Unsupported(uri.clone())),
        ImageSource::Path(path) => Ok(image::open(path)?.to_rgba8()),
        ImageSource::Bytes(bytes) => Ok(image::load_from_memory(bytes)?.to_rgba8()),
        ImageSource::SvgPath(path) => rasterize_svg(&read(path)?),
        ImageSource::SvgBytes(bytes) => rasterize_svg(bytes),
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Rasterize an SVG at its intrinsic size.
fn rasterize_svg(data: &[u8]) -> Result<RgbaImage> {
    use resvg::{tiny_skia, usvg};

    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| RenderError::Svg(e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| RenderError::Svg("empty SVG canvas".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut out = RgbaImage::new(size.width(), size.height());
    for (pixel, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        pixel.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_remote_sources_are_skipped() {
        let mut cache = ImageCache::new();
        let loaded = cache.load(&ImageSource::from("https://example.com/a.png")).unwrap();
        assert!(loaded.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_svg_is_rasterized_once() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
            <rect width="4" height="2" fill="#ff0000"/></svg>"##;
        let source = ImageSource::SvgBytes(Arc::from(&svg[..]));
        let mut cache = ImageCache::new();

        let pixels = cache.load(&source).unwrap().unwrap();
        assert_eq!(pixels.dimensions(), (4, 2));
        assert_eq!(pixels.get_pixel(1, 1).0, [255, 0, 0, 255]);

        cache.load(&source).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let source = ImageSource::Bytes(Arc::from(&b"not an image"[..]));
        assert!(matches!(
            ImageCache::new().load(&source),
            Err(RenderError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_svg_file_is_io_error() {
        let source = ImageSource::from("does/not/exist.svg");
        assert!(matches!(
            ImageCache::new().load(&source),
            Err(RenderError::Io { .. })
        ));
    }
}
