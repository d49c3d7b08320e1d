pub use image::RgbaImage;
pub use kurbo::{Affine, Point, Vec2};

/// Axis-aligned placement rectangle in template pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PosRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl PosRect {
    /// Build a rectangle from its four components.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Return `true` when nothing can be drawn into the rectangle.
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Scale every component by `multiple`, truncating toward zero.
    pub fn scaled(self, multiple: f32) -> Self {
        Self {
            x: (self.x as f32 * multiple) as i32,
            y: (self.y as f32 * multiple) as i32,
            w: (self.w as f32 * multiple) as i32,
            h: (self.h as f32 * multiple) as i32,
        }
    }
}

/// Integer destination offset for a warped avatar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Anchor {
    /// Build an anchor.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Destination quadrilateral, corners ordered top-left, bottom-left, bottom-right, top-right.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    /// Corner points in `[TL, BL, BR, TR]` order.
    pub corners: [Point; 4],
}

impl Quad {
    /// Build a quad from corners in `[TL, BL, BR, TR]` order.
    pub const fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Point {
        self.corners[1]
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Point {
        self.corners[3]
    }

    /// Copy of the quad with every corner scaled by `multiple`.
    pub fn scaled(&self, multiple: f64) -> Self {
        Self {
            corners: self
                .corners
                .map(|p| Point::new(p.x * multiple, p.y * multiple)),
        }
    }

    /// Shoelace signed area. The sign depends on winding.
    pub fn signed_area(&self) -> f64 {
        let c = &self.corners;
        let mut acc = 0.0;
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc * 0.5
    }
}

/// One resolved deform placement: the destination quad and where its local origin lands.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeformRecord {
    /// Destination corners relative to `anchor`.
    pub quad: Quad,
    /// Destination offset of the warped image's top-left.
    pub anchor: Anchor,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
