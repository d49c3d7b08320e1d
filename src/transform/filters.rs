use image::{Rgba, RgbaImage, imageops};

use crate::foundation::math::luma_601;

/// Per-frame style filter, applied in the order the template lists them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleFilter {
    /// Horizontal reflection.
    Mirror,
    /// Vertical reflection.
    Flip,
    /// BT.601 grayscale.
    Gray,
    /// Black/white threshold at half of the channel-sum range.
    Binarization,
}

impl StyleFilter {
    /// Apply this filter to one frame.
    pub fn apply(self, image: &RgbaImage) -> RgbaImage {
        match self {
            Self::Mirror => mirror_image(image),
            Self::Flip => flip_image(image),
            Self::Gray => gray_image(image),
            Self::Binarization => binarize_image(image),
        }
    }
}

/// Channel sum at or above which a pixel becomes white.
pub const BINARIZE_THRESHOLD: u32 = 383;

/// Reflect about the vertical axis.
pub fn mirror_image(image: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(image)
}

/// Reflect about the horizontal axis.
pub fn flip_image(image: &RgbaImage) -> RgbaImage {
    imageops::flip_vertical(image)
}

/// Replace R, G and B with the pixel's luma. Alpha is kept.
pub fn gray_image(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        let l = luma_601(r, g, b);
        *px = Rgba([l, l, l, a]);
    }
    out
}

/// Threshold `R + G + B` at [`BINARIZE_THRESHOLD`] into pure white or pure black. Alpha is kept.
pub fn binarize_image(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        let sum = u32::from(r) + u32::from(g) + u32::from(b);
        let v = if sum >= BINARIZE_THRESHOLD { 255 } else { 0 };
        *px = Rgba([v, v, v, a]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/filters.rs"]
mod tests;
