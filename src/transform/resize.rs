use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::error::{PetpetError, PetpetResult};
use crate::foundation::math::rgba_len;

/// Resample `image` to exactly `width x height` with a triangle (bilinear) filter.
///
/// A same-size request returns a copy without filtering.
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> PetpetResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PetpetError::resize(format!(
            "cannot resize {}x{} to {width}x{height}",
            image.width(),
            image.height()
        )));
    }
    if rgba_len(width, height).is_none() {
        return Err(PetpetError::resize(format!(
            "resize target {width}x{height} is too large"
        )));
    }
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, width, height, FilterType::Triangle))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
