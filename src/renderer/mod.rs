//! Software renderer for settled frames.
//!
//! Paints backgrounds and images into an RGBA canvas the size of the
//! viewport. Siblings paint in [`paint_order`], opacity multiplies down the
//! tree. Text is laid out by the host but not rasterized here.

mod image_cache;
pub mod raster;

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use thiserror::Error;

pub use image_cache::ImageCache;

use crate::host::Frame;
use crate::layout::{paint_order, LayoutNode};
use crate::widgets::element::{Element, ElementKind};
use crate::widgets::Color;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render SVG: {0}")]
    Svg(String),
    #[error("unsupported image source: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

pub struct Renderer {
    background: Color,
    images: ImageCache,
}

impl Renderer {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            images: ImageCache::new(),
        }
    }

    pub fn render(&mut self, frame: &Frame) -> Result<RgbaImage> {
        let width = frame.viewport.width.max(0.0).ceil() as u32;
        let height = frame.viewport.height.max(0.0).ceil() as u32;
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba(self.background.to_rgba8()));
        self.paint(&mut canvas, &frame.root, &frame.layout, 1.0)?;
        Ok(canvas)
    }

    fn paint(
        &mut self,
        canvas: &mut RgbaImage,
        element: &Element,
        node: &LayoutNode,
        parent_opacity: f32,
    ) -> Result<()> {
        let style = element.style();
        let opacity = parent_opacity * style.opacity.unwrap_or(1.0).clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return Ok(());
        }

        if let Some(color) = style.background_color {
            raster::fill_rect(canvas, node.frame, color, opacity);
        }

        match element.kind() {
            ElementKind::Image(props) => match self.images.load(&props.source)? {
                Some(pixels) => {
                    raster::draw_image(canvas, pixels, node.frame, props.resize_mode, opacity)
                }
                None => log::trace!("skipping remote image {}", props.source),
            },
            ElementKind::Text(_) | ElementKind::View => {}
        }

        for index in paint_order(element) {
            if let (Some(child), Some(child_node)) =
                (element.children().get(index), node.children.get(index))
            {
                self.paint(canvas, child, child_node, opacity)?;
            }
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}
