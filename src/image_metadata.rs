//! Intrinsic image dimensions for layout.
//!
//! Layout needs an image's natural size to derive an auto height from its
//! aspect ratio, long before (or without ever) decoding the pixels.

use std::collections::HashMap;
use std::path::Path;

use image::GenericImageView;

use crate::widgets::image::ImageSource;

/// Get the intrinsic dimensions of an image source.
///
/// Returns `None` for remote URIs, which are never fetched, and for data
/// that cannot be read or parsed.
pub fn intrinsic_size(source: &ImageSource) -> Option<(u32, u32)> {
    match source {
        ImageSource::Uri(_) => None,
        ImageSource::Path(path) => image::image_dimensions(path).ok(),
        ImageSource::Bytes(bytes) => image::load_from_memory(bytes)
            .ok()
            .map(|img| img.dimensions()),
        ImageSource::SvgPath(path) => svg_size_from_file(path),
        ImageSource::SvgBytes(bytes) => svg_size_from_bytes(bytes),
    }
}

fn svg_size_from_file(path: &Path) -> Option<(u32, u32)> {
    let data = std::fs::read(path).ok()?;
    svg_size_from_bytes(&data)
}

fn svg_size_from_bytes(bytes: &[u8]) -> Option<(u32, u32)> {
    let tree = resvg::usvg::Tree::from_data(bytes, &resvg::usvg::Options::default()).ok()?;
    let size = tree.size();
    Some((size.width() as u32, size.height() as u32))
}

/// Per-host cache of intrinsic sizes, keyed by source.
#[derive(Debug, Default)]
pub struct IntrinsicSizes {
    cache: HashMap<ImageSource, Option<(u32, u32)>>,
}

impl IntrinsicSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, source: &ImageSource) -> Option<(u32, u32)> {
        if let Some(size) = self.cache.get(source) {
            return *size;
        }
        let size = intrinsic_size(source);
        if size.is_none() {
            log::debug!("no intrinsic size for {source}");
        }
        self.cache.insert(source.clone(), size);
        size
    }

    /// Record a known size, e.g. for a URI the caller already measured.
    pub fn insert(&mut self, source: ImageSource, size: (u32, u32)) {
        self.cache.insert(source, Some(size));
    }
}
