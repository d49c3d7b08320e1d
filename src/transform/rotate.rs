use image::{Rgba, RgbaImage};

use crate::foundation::core::{Affine, Point};
use crate::transform::sample::sample_bilinear;

/// Size of the canvas that holds `width x height` rotated by `angle_deg` without clipping.
///
/// `(w|cos| + h|sin|, h|cos| + w|sin|)`, each floored and at least 1.
pub fn rotated_canvas_size(width: u32, height: u32, angle_deg: f32) -> (u32, u32) {
    let rad = f64::from(angle_deg).to_radians();
    let (s, c) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));
    let nw = (w * c + h * s).floor().max(1.0);
    let nh = (h * c + w * s).floor().max(1.0);
    (nw as u32, nh as u32)
}

/// Rotate clockwise (y-down) about the image center onto a grown transparent canvas.
///
/// The source is placed at integer offset `((nw - w) / 2, (nh - h) / 2)` before rotating, so
/// no corner is clipped.
pub fn rotate_image(image: &RgbaImage, angle_deg: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let (nw, nh) = rotated_canvas_size(w, h, angle_deg);
    let ox = (nw as i64 - w as i64) / 2;
    let oy = (nh as i64 - h as i64) / 2;

    let dst_from_src = Affine::translate((ox as f64, oy as f64))
        * Affine::rotate_about(f64::from(angle_deg).to_radians(), center(w, h));
    resample(image, nw, nh, dst_from_src)
}

/// Rotate about the image center while keeping the original canvas size.
///
/// Used when no corner can be exposed: quarter turns, or circle-masked avatars.
pub fn rotate_in_place(image: &RgbaImage, angle_deg: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let dst_from_src = Affine::rotate_about(f64::from(angle_deg).to_radians(), center(w, h));
    resample(image, w, h, dst_from_src)
}

fn center(w: u32, h: u32) -> Point {
    Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0)
}

fn resample(image: &RgbaImage, width: u32, height: u32, dst_from_src: Affine) -> RgbaImage {
    let src_from_dst = dst_from_src.inverse();
    RgbaImage::from_fn(width, height, |x, y| {
        let p = src_from_dst * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        Rgba(sample_bilinear(image, p.x, p.y))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rotate.rs"]
mod tests;
