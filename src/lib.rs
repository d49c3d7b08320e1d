//! Avatar placement and transform pipeline for template-based image macros.
//!
//! A template declares, per output frame, where an avatar goes: an axis-aligned rectangle
//! (`ZOOM` / `MARGIN`) or a free quadrilateral plus anchor (`DEFORM`). Coordinates may be literal
//! integers or small arithmetic expressions over the avatar's `width` and `height`.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: an [`AvatarProvider`] (or a local file) supplies raw RGBA8 frames.
//! 2. **Build**: [`AvatarModel::build`] resolves the placement table, then crops, styles,
//!    circle-masks and batch-resizes every frame once.
//! 3. **Draw**: per output frame, read `rect` / `deform` / `angle` / `frame` by index and call
//!    [`draw_zoom_avatar`] or [`draw_deform_avatar`] on the caller's canvas.
//!
//! Frames are straight-alpha [`image::RgbaImage`] buffers throughout; compositing converts to
//! premultiplied alpha per pixel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod avatar;
mod config;
mod effects;
mod expression;
mod foundation;
mod placement;
mod render;
mod transform;

pub use assets::decode::{decode_frames, decode_path};
pub use avatar::data::{AvatarData, AvatarType, Position};
pub use avatar::model::AvatarModel;
pub use avatar::source::{AvatarProvider, AvatarSource, ProviderMap, acquire};
pub use config::PipelineConfig;
pub use effects::composite::{PremulRgba8, blit_over, over, premultiply, unpremultiply};
pub use expression::eval::resolve_coord;
pub use foundation::core::{Anchor, DeformRecord, Point, PosRect, Quad, RgbaImage};
pub use foundation::error::{PetpetError, PetpetResult};
pub use placement::resolver::{Placement, PositionMode, TemplateType, resolve_placement};
pub use placement::table::{DeformTable, RectTable};
pub use placement::tokens::PosTokens;
pub use render::draw::{ZoomDrawParams, draw_deform_avatar, draw_zoom_avatar};
pub use render::pool::WorkerPool;
pub use transform::crop::{CropSpec, CropType, crop_image};
pub use transform::filters::{
    BINARIZE_THRESHOLD, StyleFilter, binarize_image, flip_image, gray_image, mirror_image,
};
pub use transform::fit::{FitPlan, FitType, fit_into};
pub use transform::mask::convert_circular;
pub use transform::resize::resize_exact;
pub use transform::rotate::{rotate_image, rotate_in_place, rotated_canvas_size};
pub use transform::warp::{is_convex, validate_quad, warp_quad};
