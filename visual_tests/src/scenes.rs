//! Hero scenes rendered for snapshot comparison.
//!
//! Every scene builds its own image sources in memory so snapshots never
//! depend on files or the network. Sources are drawn at their natural size
//! (fit scale 1, tiling, or crisp SVG edges) so the captured pixels do not
//! depend on resampling filters.

use std::io::Cursor;
use std::sync::Arc;

use guido_hero::prelude::{
    text, view, Color, HeroConfig, HeroView, Host, ImageSource, Renderer, ResizeMode, Style,
    WindowSize,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::Result;

/// Canvas color behind every scene.
pub const BACKGROUND: u32 = 0x202020;

/// A named, deterministic hero setup.
pub struct Scene {
    pub name: &'static str,
    pub window: WindowSize,
    /// Rotate the window once after mounting.
    pub rotate: bool,
    build: fn() -> Result<HeroConfig>,
}

impl Scene {
    pub fn config(&self) -> Result<HeroConfig> {
        (self.build)()
    }
}

pub const SCENES: &[Scene] = &[
    Scene {
        name: "hero_tint",
        window: WindowSize::new(200.0, 300.0),
        rotate: false,
        build: tint,
    },
    Scene {
        name: "hero_center_min_height",
        window: WindowSize::new(200.0, 300.0),
        rotate: false,
        build: center_min_height,
    },
    Scene {
        name: "hero_content_rotated",
        window: WindowSize::new(120.0, 200.0),
        rotate: true,
        build: content_rotated,
    },
    Scene {
        name: "hero_svg_repeat",
        window: WindowSize::new(96.0, 64.0),
        rotate: false,
        build: svg_repeat,
    },
];

pub fn find(name: &str) -> Option<&'static Scene> {
    SCENES.iter().find(|scene| scene.name == name)
}

/// Mount the scene's hero, apply its window change and rasterize the
/// settled frame.
pub fn render(scene: &Scene) -> Result<RgbaImage> {
    let mut host = Host::new(HeroView::new(scene.config()?), scene.window);
    let mut frame = host.mount();
    if scene.rotate {
        host.set_window_size(scene.window.rotated());
        frame = host.frame();
    }
    log::debug!(
        "scene {} settled in {} passes at {:?}",
        scene.name,
        frame.passes,
        frame.viewport
    );
    Ok(Renderer::new(Color::from_hex(BACKGROUND)).render(&frame)?)
}

/// Horizontal red to blue gradient with 4px stripes, encoded as PNG.
pub fn gradient_png(width: u32, height: u32) -> Result<ImageSource> {
    let span = width.saturating_sub(1).max(1) as f32;
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        let t = x as f32 / span;
        let shade = if (y / 4) % 2 == 0 { 255 } else { 200 };
        Rgba([
            ((1.0 - t) * shade as f32) as u8,
            40,
            (t * shade as f32) as u8,
            255,
        ])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(pixels).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(ImageSource::Bytes(Arc::from(buf)))
}

fn checker_svg() -> ImageSource {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" shape-rendering="crispEdges">
  <rect width="16" height="16" fill="#f0c040"/>
  <rect width="8" height="8" fill="#305080"/>
  <rect x="8" y="8" width="8" height="8" fill="#305080"/>
</svg>"##;
    ImageSource::SvgBytes(Arc::from(svg.as_bytes()))
}

/// Image at its natural 2:1 width, default red tint stretched over it.
fn tint() -> Result<HeroConfig> {
    Ok(HeroConfig::new(gradient_png(200, 100)?)
        .overlay_color(Color::RED)
        .full_width(false))
}

/// Pinned height taller than the image, image centered without scaling.
fn center_min_height() -> Result<HeroConfig> {
    Ok(HeroConfig::new(gradient_png(64, 32)?)
        .min_height(160.0)
        .resize_mode(ResizeMode::Center)
        .overlay_color(Color::BLACK)
        .overlay_opacity(0.5))
}

/// Height from an 80px content box, width from the rotated window.
fn content_rotated() -> Result<HeroConfig> {
    Ok(HeroConfig::new(gradient_png(48, 48)?)
        .resize_mode(ResizeMode::Repeat)
        .overlay_color(Color::BLUE)
        .content(|| {
            view()
                .with_style(Style::new().height(80.0).background_color(Color::rgba(
                    1.0, 1.0, 1.0, 0.25,
                )))
                .child(text("Hero"))
        }))
}

fn svg_repeat() -> Result<HeroConfig> {
    Ok(HeroConfig::new(checker_svg())
        .min_height(48.0)
        .resize_mode(ResizeMode::Repeat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_names_are_unique() {
        for (i, scene) in SCENES.iter().enumerate() {
            assert!(SCENES[i + 1..].iter().all(|other| other.name != scene.name));
        }
    }

    #[test]
    fn test_render_matches_viewport() {
        let scene = find("hero_content_rotated").unwrap();
        let canvas = render(scene).unwrap();
        // rotated window
        assert_eq!(canvas.dimensions(), (200, 120));
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = find("hero_tint").unwrap();
        assert_eq!(render(scene).unwrap(), render(scene).unwrap());
    }

    #[test]
    fn test_content_rotated_layout() {
        let canvas = render(find("hero_content_rotated").unwrap()).unwrap();
        let background = Color::from_hex(BACKGROUND).to_rgba8();
        // hero is 80px tall and spans the rotated width
        assert_ne!(canvas.get_pixel(199, 79).0, background);
        assert_eq!(canvas.get_pixel(199, 80).0, background);
    }

    #[test]
    fn test_center_does_not_scale_image() {
        let canvas = render(find("hero_center_min_height").unwrap()).unwrap();
        // outside the centered 64x32 image only the black tint covers the canvas
        let tinted = canvas.get_pixel(10, 10).0;
        assert_eq!(tinted, canvas.get_pixel(67, 64).0);
        assert_ne!(tinted, canvas.get_pixel(68, 64).0);
    }
}
