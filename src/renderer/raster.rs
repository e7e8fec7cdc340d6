//! Pixel operations on the software canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::widgets::{Color, Rect, ResizeMode};

/// Source-over blend of one pixel with an extra opacity factor.
fn blend(dst: &mut Rgba<u8>, src: [u8; 4], opacity: f32) {
    let alpha = src[3] as f32 / 255.0 * opacity;
    if alpha <= 0.0 {
        return;
    }
    for channel in 0..3 {
        let s = src[channel] as f32;
        let d = dst.0[channel] as f32;
        dst.0[channel] = (s * alpha + d * (1.0 - alpha)).round() as u8;
    }
    let d_alpha = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((alpha + d_alpha * (1.0 - alpha)) * 255.0).round() as u8;
}

/// Integer pixel span covered by `rect`, clipped to the canvas.
fn pixel_span(canvas: &RgbaImage, rect: Rect) -> Option<(u32, u32, u32, u32)> {
    let bounds = Rect::new(0.0, 0.0, canvas.width() as f32, canvas.height() as f32);
    let clipped = rect.intersection(&bounds)?;
    let x0 = clipped.x.round() as u32;
    let y0 = clipped.y.round() as u32;
    let x1 = (clipped.right().round() as u32).min(canvas.width());
    let y1 = (clipped.bottom().round() as u32).min(canvas.height());
    (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
}

pub fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Color, opacity: f32) {
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, rect) else {
        return;
    };
    let src = color.to_rgba8();
    for y in y0..y1 {
        for x in x0..x1 {
            blend(canvas.get_pixel_mut(x, y), src, opacity);
        }
    }
}

/// Where an image of `intrinsic` size lands inside `bounds`.
pub fn fit_rect(bounds: Rect, intrinsic: (u32, u32), mode: ResizeMode) -> Rect {
    let (iw, ih) = (intrinsic.0 as f32, intrinsic.1 as f32);
    if iw <= 0.0 || ih <= 0.0 {
        return Rect::new(bounds.x, bounds.y, 0.0, 0.0);
    }
    let scale = match mode {
        ResizeMode::Stretch => return bounds,
        ResizeMode::Repeat => return Rect::new(bounds.x, bounds.y, iw, ih),
        ResizeMode::Cover => (bounds.width / iw).max(bounds.height / ih),
        ResizeMode::Contain => (bounds.width / iw).min(bounds.height / ih),
        ResizeMode::Center => (bounds.width / iw).min(bounds.height / ih).min(1.0),
    };
    let (w, h) = (iw * scale, ih * scale);
    Rect::new(
        bounds.x + (bounds.width - w) / 2.0,
        bounds.y + (bounds.height - h) / 2.0,
        w,
        h,
    )
}

/// Draw `pixels` fitted into `bounds` and clipped to it.
pub fn draw_image(
    canvas: &mut RgbaImage,
    pixels: &RgbaImage,
    bounds: Rect,
    mode: ResizeMode,
    opacity: f32,
) {
    let dest = fit_rect(bounds, pixels.dimensions(), mode);
    let (dw, dh) = (dest.width.round() as u32, dest.height.round() as u32);
    if dw == 0 || dh == 0 {
        return;
    }

    if mode == ResizeMode::Repeat {
        let mut y = bounds.y;
        while y < bounds.bottom() {
            let mut x = bounds.x;
            while x < bounds.right() {
                blit(canvas, pixels, x, y, bounds, opacity);
                x += dest.width;
            }
            y += dest.height;
        }
        return;
    }

    let scaled;
    let source = if (dw, dh) == pixels.dimensions() {
        pixels
    } else {
        scaled = imageops::resize(pixels, dw, dh, FilterType::Triangle);
        &scaled
    };
    blit(canvas, source, dest.x, dest.y, bounds, opacity);
}

/// Copy `src` with its top-left corner at (x, y), clipped to `clip`.
fn blit(canvas: &mut RgbaImage, src: &RgbaImage, x: f32, y: f32, clip: Rect, opacity: f32) {
    let target = Rect::new(x, y, src.width() as f32, src.height() as f32);
    let Some(visible) = target.intersection(&clip) else {
        return;
    };
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, visible) else {
        return;
    };
    let (ox, oy) = (x.round() as i64, y.round() as i64);
    for cy in y0..y1 {
        for cx in x0..x1 {
            let sx = cx as i64 - ox;
            let sy = cy as i64 - oy;
            if sx < 0 || sy < 0 || sx >= src.width() as i64 || sy >= src.height() as i64 {
                continue;
            }
            let src_pixel = src.get_pixel(sx as u32, sy as u32).0;
            blend(canvas.get_pixel_mut(cx, cy), src_pixel, opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_cover_fills_and_centers() {
        let dest = fit_rect(Rect::new(0.0, 0.0, 100.0, 100.0), (200, 100), ResizeMode::Cover);
        assert_eq!(dest, Rect::new(-50.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_fit_contain_letterboxes() {
        let dest = fit_rect(Rect::new(0.0, 0.0, 100.0, 100.0), (200, 100), ResizeMode::Contain);
        assert_eq!(dest, Rect::new(0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_fit_center_never_upscales() {
        let dest = fit_rect(Rect::new(0.0, 0.0, 100.0, 100.0), (20, 10), ResizeMode::Center);
        assert_eq!(dest, Rect::new(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_fill_rect_blends_with_opacity() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        fill_rect(&mut canvas, Rect::new(0.0, 0.0, 2.0, 4.0), Color::RED, 0.5);
        assert_eq!(canvas.get_pixel(0, 0).0, [128, 0, 128, 255]);
        assert_eq!(canvas.get_pixel(3, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_draw_image_clips_to_bounds() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let white = RgbaImage::from_pixel(4, 2, Rgba([255, 255, 255, 255]));
        draw_image(
            &mut canvas,
            &white,
            Rect::new(2.0, 2.0, 4.0, 4.0),
            ResizeMode::Cover,
            1.0,
        );
        assert_eq!(canvas.get_pixel(2, 2).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(1, 2).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(6, 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_draw_image_repeat_tiles() {
        let mut canvas = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 255]));
        let mut tile = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        tile.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        draw_image(
            &mut canvas,
            &tile,
            Rect::new(0.0, 0.0, 4.0, 1.0),
            ResizeMode::Repeat,
            1.0,
        );
        assert_eq!(canvas.get_pixel(0, 0).0[0], 255);
        assert_eq!(canvas.get_pixel(1, 0).0[0], 0);
        assert_eq!(canvas.get_pixel(2, 0).0[0], 255);
    }
}
