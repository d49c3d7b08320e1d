use image::RgbaImage;

use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels, with `src` scaled by `opacity` first.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let src_a = mul_div255(u16::from(src[3]), op);
    if src_a == 0 {
        return dst;
    }
    let keep = 255 - u16::from(src_a);
    let mut out = [0u8; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        let s = if i == 3 {
            src_a
        } else {
            mul_div255(u16::from(src[i]), op)
        };
        *slot = add_sat_u8(s, mul_div255(u16::from(dst[i]), keep));
    }
    out
}

/// Straight-alpha RGBA8 to premultiplied.
pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

/// Premultiplied RGBA8 back to straight alpha.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Draw straight-alpha `src` onto straight-alpha `dst` with its top-left at `(x, y)`.
///
/// Pixels falling outside `dst` are clipped.
pub fn blit_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, opacity: f32) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + sw).min(dw);
    let y_end = (y + sh).min(dh);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let s = src.get_pixel((tx - x) as u32, (ty - y) as u32).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(tx as u32, ty as u32);
            let out = over(premultiply(d.0), premultiply(s), opacity);
            d.0 = unpremultiply(out);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
