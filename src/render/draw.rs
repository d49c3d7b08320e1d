//! Stateless draw entry points that write one resolved avatar frame into a canvas.

use image::RgbaImage;

use crate::effects::composite::blit_over;
use crate::foundation::core::{Anchor, DeformRecord, PosRect};
use crate::foundation::error::PetpetResult;
use crate::transform::crop::{CropSpec, CropType, crop_image};
use crate::transform::fit::{FitType, fit_into};
use crate::transform::resize::resize_exact;
use crate::transform::rotate::{rotate_image, rotate_in_place};
use crate::transform::warp::warp_quad;

/// Inputs for [`draw_zoom_avatar`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomDrawParams {
    /// Target rectangle before scaling.
    pub rect: PosRect,
    /// Rotation in degrees, clockwise.
    pub angle: f32,
    /// The avatar is circle-masked, so rotation never exposes corners.
    pub round: bool,
    /// Scale applied to `rect`.
    pub multiple: f32,
    /// Aspect-ratio strategy.
    pub fit: FitType,
    /// Source-over opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Default for ZoomDrawParams {
    fn default() -> Self {
        Self {
            rect: PosRect::default(),
            angle: 0.0,
            round: false,
            multiple: 1.0,
            fit: FitType::Fill,
            opacity: 1.0,
        }
    }
}

/// Draw `avatar` stretched into a (scaled, fitted, optionally rotated) rectangle of `canvas`.
///
/// Empty rectangles draw nothing. Output outside the canvas is clipped.
pub fn draw_zoom_avatar(
    canvas: &mut RgbaImage,
    avatar: &RgbaImage,
    params: &ZoomDrawParams,
) -> PetpetResult<()> {
    let rect = params.rect.scaled(params.multiple);
    let Some(plan) = fit_into(params.fit, avatar.width(), avatar.height(), rect) else {
        return Ok(());
    };

    let cropped;
    let source = match plan.source_crop {
        Some((w, h)) if (w, h) != avatar.dimensions() => {
            let spec = CropSpec::from_values(&[w as i32, h as i32], CropType::Pixel)?;
            cropped = crop_image(avatar, &spec)?;
            &cropped
        }
        _ => avatar,
    };

    let dest = plan.dest;
    let angle = params.angle;
    let stretched = if angle == 0.0 {
        resize_exact(source, dest.w as u32, dest.h as u32)?
    } else if params.round || angle % 90.0 == 0.0 {
        resize_exact(&rotate_in_place(source, angle), dest.w as u32, dest.h as u32)?
    } else {
        resize_exact(&rotate_image(source, angle), dest.w as u32, dest.h as u32)?
    };

    blit_over(
        canvas,
        &stretched,
        i64::from(dest.x),
        i64::from(dest.y),
        params.opacity,
    );
    Ok(())
}

/// Warp `avatar` onto a deform record and draw it at the record's anchor.
///
/// Corners and anchor are scaled by `multiple` on a copy; `record` is left untouched.
pub fn draw_deform_avatar(
    canvas: &mut RgbaImage,
    avatar: &RgbaImage,
    record: &DeformRecord,
    multiple: f32,
) -> PetpetResult<()> {
    let quad = record.quad.scaled(f64::from(multiple));
    let anchor = Anchor::new(
        (record.anchor.x as f32 * multiple) as i32,
        (record.anchor.y as f32 * multiple) as i32,
    );
    let warped = warp_quad(avatar, &quad)?;
    blit_over(
        canvas,
        &warped,
        i64::from(anchor.x),
        i64::from(anchor.y),
        1.0,
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
