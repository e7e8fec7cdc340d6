//! Mounts a hero, rotates the window, and writes each settled frame to PNG.
//!
//! Run with `RUST_LOG=debug` to watch the layout passes.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use guido_hero::prelude::{
    text, view, HeroConfig, HeroView, Host, ImageSource, Renderer, WindowSize,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

fn sunset(width: u32, height: u32) -> Result<ImageSource, image::ImageError> {
    let pixels = RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / height as f32;
        Rgba([
            255,
            (160.0 * (1.0 - t)) as u8 + 40,
            (200.0 * t) as u8,
            255,
        ])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(pixels).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(ImageSource::Bytes(Arc::from(buf)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "target".into()));
    std::fs::create_dir_all(&out_dir)?;

    let config = HeroConfig::new(sunset(320, 180)?)
        .overlay_color("black".parse()?)
        .overlay_opacity(0.4)
        .content(|| {
            view()
                .child(text("Guido Hero").font_size(28.0))
                .child(text("Sized by its content"))
        });

    let portrait = WindowSize::new(390.0, 844.0).with_scale(3.0);
    let mut host = Host::new(HeroView::new(config), portrait);
    let mut renderer = Renderer::default();

    let frame = host.mount();
    let path = out_dir.join("hero_portrait.png");
    renderer.render(&frame)?.save(&path)?;
    log::info!("wrote {} after {} passes", path.display(), frame.passes);

    host.set_window_size(portrait.rotated());
    let frame = host.frame();
    let path = out_dir.join("hero_landscape.png");
    renderer.render(&frame)?.save(&path)?;
    log::info!("wrote {} after {} passes", path.display(), frame.passes);

    host.update_props(HeroConfig::new(sunset(160, 160)?));
    let frame = host.frame();
    log::info!("image height after source swap: {}", frame.layout.frame.height);

    host.unmount();
    Ok(())
}
