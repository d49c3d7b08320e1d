use image::{Rgba, RgbaImage};

use crate::expression::eval::resolve_coord;
use crate::foundation::error::{PetpetError, PetpetResult};
use crate::foundation::math::rgba_len;
use crate::placement::tokens::PosTokens;

/// How crop coordinates are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CropType {
    /// No crop type declared; a present crop spec is read as pixels.
    #[default]
    None,
    /// Absolute pixel corners.
    Pixel,
    /// Corners as percentages of the source dimensions.
    Percent,
}

/// Normalized crop corners `(x1, y1, x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CropSpec {
    /// Corner coordinates `[x1, y1, x2, y2]`.
    pub corners: [i32; 4],
    /// Interpret corners as percentages.
    pub percent: bool,
}

impl CropSpec {
    /// Normalize resolved crop values: `[w, h]` becomes `[0, 0, w, h]`, four values are kept.
    pub fn from_values(values: &[i32], crop_type: CropType) -> PetpetResult<Self> {
        let corners = match *values {
            [w, h] => [0, 0, w, h],
            [x1, y1, x2, y2] => [x1, y1, x2, y2],
            _ => {
                return Err(PetpetError::configuration(format!(
                    "crop spec must have 2 or 4 values, got {}",
                    values.len()
                )));
            }
        };
        Ok(Self {
            corners,
            percent: matches!(crop_type, CropType::Percent),
        })
    }

    /// Resolve a flat token list against the avatar size, then normalize it like
    /// [`CropSpec::from_values`].
    pub fn from_tokens(
        tokens: &PosTokens,
        crop_type: CropType,
        width: u32,
        height: u32,
    ) -> PetpetResult<Self> {
        let items = match tokens.as_list() {
            Some(items) if tokens.is_flat_list() => items,
            _ => {
                return Err(PetpetError::configuration(
                    "crop spec must be a flat list of tokens",
                ));
            }
        };
        let values = items
            .iter()
            .filter_map(PosTokens::as_scalar)
            .map(|t| resolve_coord(t, width, height))
            .collect::<PetpetResult<Vec<_>>>()?;
        Self::from_values(&values, crop_type)
    }

    /// Corners in source pixels for an image of the given size.
    pub fn pixel_corners(&self, width: u32, height: u32) -> [i32; 4] {
        if !self.percent {
            return self.corners;
        }
        let [x1, y1, x2, y2] = self.corners;
        let px = |c: i32, dim: u32| (c as f32 / 100.0 * dim as f32) as i32;
        [px(x1, width), px(y1, height), px(x2, width), px(y2, height)]
    }
}

/// Cut the `(x1, y1)..(x2, y2)` region out of `image`.
///
/// Parts of the region outside the source are transparent.
pub fn crop_image(image: &RgbaImage, spec: &CropSpec) -> PetpetResult<RgbaImage> {
    let [x1, y1, x2, y2] = spec.pixel_corners(image.width(), image.height());
    let w = i64::from(x2) - i64::from(x1);
    let h = i64::from(y2) - i64::from(y1);
    if w <= 0 || h <= 0 {
        return Err(PetpetError::configuration(format!(
            "degenerate crop region ({x1},{y1})..({x2},{y2})"
        )));
    }
    let (w, h) = match (u32::try_from(w), u32::try_from(h)) {
        (Ok(w), Ok(h)) if rgba_len(w, h).is_some() => (w, h),
        _ => {
            return Err(PetpetError::configuration(format!(
                "crop region {w}x{h} is too large"
            )));
        }
    };

    let (sw, sh) = (i64::from(image.width()), i64::from(image.height()));
    let out = RgbaImage::from_fn(w, h, |x, y| {
        let sx = i64::from(x1) + i64::from(x);
        let sy = i64::from(y1) + i64::from(y);
        if sx < 0 || sy < 0 || sx >= sw || sy >= sh {
            Rgba([0, 0, 0, 0])
        } else {
            *image.get_pixel(sx as u32, sy as u32)
        }
    });
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/crop.rs"]
mod tests;
