use image::RgbaImage;

use crate::effects::composite::{premultiply, unpremultiply};

/// Bilinear sample at continuous pixel coordinates (pixel centers sit at `i + 0.5`).
///
/// Taps outside the image are transparent, so edges fade over half a pixel. Interpolation runs
/// on premultiplied values to avoid dark fringes around transparent areas.
pub(crate) fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let tap = |xi: i64, yi: i64| -> [f64; 4] {
        if xi < 0 || yi < 0 || xi >= w || yi >= h {
            return [0.0; 4];
        }
        let p = premultiply(image.get_pixel(xi as u32, yi as u32).0);
        p.map(f64::from)
    };

    let p00 = tap(x0, y0);
    let p10 = tap(x0 + 1, y0);
    let p01 = tap(x0, y0 + 1);
    let p11 = tap(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] + (p10[c] - p00[c]) * tx;
        let bottom = p01[c] + (p11[c] - p01[c]) * tx;
        let v = top + (bottom - top) * ty;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    unpremultiply(out)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/sample.rs"]
mod tests;
