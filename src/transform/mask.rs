use image::{Rgba, RgbaImage};

use crate::foundation::math::mul_div255_u8;

const AA_GRID: u32 = 4;

/// Clip `image` to the ellipse inscribed in its bounds.
///
/// Pixels whose center lies outside the ellipse become fully transparent. With `antialias`,
/// boundary pixels keep alpha proportional to their covered area (4x4 supersampling).
pub fn convert_circular(image: &RgbaImage, antialias: bool) -> RgbaImage {
    let (w, h) = image.dimensions();
    let rx = f64::from(w) / 2.0;
    let ry = f64::from(h) / 2.0;
    let inside = |px: f64, py: f64| {
        let dx = (px - rx) / rx;
        let dy = (py - ry) / ry;
        dx * dx + dy * dy <= 1.0
    };

    let mut out = image.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let coverage = if antialias {
            let mut hits = 0u32;
            for sy in 0..AA_GRID {
                for sx in 0..AA_GRID {
                    let fx = f64::from(x) + (f64::from(sx) + 0.5) / f64::from(AA_GRID);
                    let fy = f64::from(y) + (f64::from(sy) + 0.5) / f64::from(AA_GRID);
                    if inside(fx, fy) {
                        hits += 1;
                    }
                }
            }
            (hits * 255 / (AA_GRID * AA_GRID)) as u16
        } else if inside(f64::from(x) + 0.5, f64::from(y) + 0.5) {
            255
        } else {
            0
        };

        match coverage {
            255 => {}
            0 => *px = Rgba([0, 0, 0, 0]),
            c => px.0[3] = mul_div255_u8(u16::from(px.0[3]), c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mask.rs"]
mod tests;
