//! Quadrilateral warp for DEFORM placements.
//!
//! The source image's unit square maps onto a destination quad with corners in
//! `[TL, BL, BR, TR]` order. Convex quads use a projective mapping; simple concave quads fall
//! back to inverse bilinear mapping, which stays seamless where a homography would fold.

use image::{Rgba, RgbaImage};

use crate::foundation::core::{Point, Quad, Vec2};
use crate::foundation::error::{PetpetError, PetpetResult};
use crate::foundation::math::rgba_len;
use crate::transform::sample::sample_bilinear;

const MIN_AREA: f64 = 1e-6;
const UV_EPS: f64 = 1e-9;

/// Warp `image` onto `quad`.
///
/// The output spans `(0, 0)..(ceil(max x), ceil(max y))` of the quad's own coordinate space;
/// corners with negative coordinates are clipped. An output too large to allocate is a
/// configuration error.
pub fn warp_quad(image: &RgbaImage, quad: &Quad) -> PetpetResult<RgbaImage> {
    validate_quad(quad)?;

    let (max_x, max_y) = quad
        .corners
        .iter()
        .fold((0.0f64, 0.0f64), |(mx, my), p| (mx.max(p.x), my.max(p.y)));
    let out_w = max_x.ceil().max(1.0) as u32;
    let out_h = max_y.ceil().max(1.0) as u32;
    if rgba_len(out_w, out_h).is_none() {
        return Err(PetpetError::configuration(format!(
            "warped quad spans {out_w}x{out_h}, too large"
        )));
    }

    // Degenerate corners (a straight angle, a repeated point) still pass as convex but have
    // no invertible projective mapping.
    let projective = is_convex(quad)
        .then(|| Homography::square_to_quad(quad).and_then(|h| h.inverse()).ok())
        .flatten();
    let mapper = match projective {
        Some(inv) => UvMapper::Projective(inv),
        None => UvMapper::Bilinear(*quad),
    };

    let (sw, sh) = (f64::from(image.width()), f64::from(image.height()));
    Ok(RgbaImage::from_fn(out_w, out_h, |x, y| {
        let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        match mapper.uv(p) {
            Some((u, v)) => Rgba(sample_bilinear(image, u * sw, v * sh)),
            None => Rgba([0, 0, 0, 0]),
        }
    }))
}

/// Reject quads that cannot be warped: non-finite, zero-area or self-intersecting.
pub fn validate_quad(quad: &Quad) -> PetpetResult<()> {
    if quad
        .corners
        .iter()
        .any(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(PetpetError::geometry("quad has non-finite corners"));
    }
    let area = quad.signed_area();
    if area.abs() < MIN_AREA {
        return Err(PetpetError::geometry(format!(
            "quad has zero area: {:?}",
            quad.corners
        )));
    }
    let c = &quad.corners;
    if segments_cross(c[0], c[1], c[2], c[3]) || segments_cross(c[1], c[2], c[3], c[0]) {
        return Err(PetpetError::geometry(format!(
            "quad is self-intersecting: {:?}",
            quad.corners
        )));
    }
    Ok(())
}

/// Return `true` when every turn along the corner loop has the same orientation.
pub fn is_convex(quad: &Quad) -> bool {
    let c = &quad.corners;
    let mut sign = 0.0f64;
    for i in 0..4 {
        let e0 = c[(i + 1) % 4] - c[i];
        let e1 = c[(i + 2) % 4] - c[(i + 1) % 4];
        let z = e0.cross(e1);
        if z.abs() < MIN_AREA {
            continue;
        }
        if sign == 0.0 {
            sign = z.signum();
        } else if z.signum() != sign {
            return false;
        }
    }
    true
}

fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

enum UvMapper {
    Projective(Homography),
    Bilinear(Quad),
}

impl UvMapper {
    fn uv(&self, p: Point) -> Option<(f64, f64)> {
        let (u, v) = match self {
            Self::Projective(inv) => inv.apply(p)?,
            Self::Bilinear(q) => inverse_bilinear(q, p)?,
        };
        in_unit(u, v).then_some((u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)))
    }
}

fn in_unit(u: f64, v: f64) -> bool {
    (-UV_EPS..=1.0 + UV_EPS).contains(&u) && (-UV_EPS..=1.0 + UV_EPS).contains(&v)
}

/// Row-major 3x3 projective matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Homography([f64; 9]);

impl Homography {
    /// Map the unit square `(0,0),(0,1),(1,1),(1,0)` onto the quad's `TL, BL, BR, TR`.
    pub(crate) fn square_to_quad(quad: &Quad) -> PetpetResult<Self> {
        let p0 = quad.top_left();
        let p1 = quad.top_right();
        let p2 = quad.bottom_right();
        let p3 = quad.bottom_left();

        let dx1 = p1.x - p2.x;
        let dx2 = p3.x - p2.x;
        let dx3 = p0.x - p1.x + p2.x - p3.x;
        let dy1 = p1.y - p2.y;
        let dy2 = p3.y - p2.y;
        let dy3 = p0.y - p1.y + p2.y - p3.y;

        let det = dx1 * dy2 - dx2 * dy1;
        if det.abs() < f64::EPSILON {
            return Err(PetpetError::geometry("quad has collinear corner edges"));
        }
        let g = (dx3 * dy2 - dx2 * dy3) / det;
        let h = (dx1 * dy3 - dx3 * dy1) / det;

        Ok(Self([
            p1.x - p0.x + g * p1.x,
            p3.x - p0.x + h * p3.x,
            p0.x,
            p1.y - p0.y + g * p1.y,
            p3.y - p0.y + h * p3.y,
            p0.y,
            g,
            h,
            1.0,
        ]))
    }

    pub(crate) fn inverse(&self) -> PetpetResult<Self> {
        let [a, b, c, d, e, f, g, h, i] = self.0;
        let co_a = e * i - f * h;
        let co_b = -(d * i - f * g);
        let co_c = d * h - e * g;
        let det = a * co_a + b * co_b + c * co_c;
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return Err(PetpetError::geometry("quad mapping is not invertible"));
        }
        let inv = 1.0 / det;
        Ok(Self([
            co_a * inv,
            -(b * i - c * h) * inv,
            (b * f - c * e) * inv,
            co_b * inv,
            (a * i - c * g) * inv,
            -(a * f - c * d) * inv,
            co_c * inv,
            -(a * h - b * g) * inv,
            (a * e - b * d) * inv,
        ]))
    }

    pub(crate) fn apply(&self, p: Point) -> Option<(f64, f64)> {
        let [a, b, c, d, e, f, g, h, i] = self.0;
        let w = g * p.x + h * p.y + i;
        if w.abs() < f64::EPSILON {
            return None;
        }
        Some(((a * p.x + b * p.y + c) / w, (d * p.x + e * p.y + f) / w))
    }
}

/// Solve `p = a + u*e + v*f + u*v*g` for `(u, v)` inside the unit square.
fn inverse_bilinear(q: &Quad, p: Point) -> Option<(f64, f64)> {
    let a = q.top_left();
    let e = q.top_right() - a;
    let f = q.bottom_left() - a;
    let g = (a.to_vec2() - q.top_right().to_vec2()) + (q.bottom_right().to_vec2()
        - q.bottom_left().to_vec2());
    let h = p - a;

    let k2 = g.cross(f);
    let k1 = e.cross(f) + h.cross(g);
    let k0 = h.cross(e);

    let candidates: [Option<f64>; 2] = if k2.abs() < 1e-12 {
        if k1.abs() < 1e-12 {
            return None;
        }
        [Some(-k0 / k1), None]
    } else {
        let disc = k1 * k1 - 4.0 * k0 * k2;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let ik2 = 0.5 / k2;
        [Some((-k1 - sq) * ik2), Some((-k1 + sq) * ik2)]
    };

    candidates.into_iter().flatten().find_map(|v| {
        let u = solve_u(h, e, f, g, v)?;
        in_unit(u, v).then_some((u, v))
    })
}

fn solve_u(h: Vec2, e: Vec2, f: Vec2, g: Vec2, v: f64) -> Option<f64> {
    let den = e + g * v;
    let num = h - f * v;
    if den.x.abs() >= den.y.abs() {
        (den.x.abs() > 1e-12).then(|| num.x / den.x)
    } else {
        Some(num.y / den.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/warp.rs"]
mod tests;
