use image::RgbaImage;
use rand::Rng;
use tracing::debug;

use crate::avatar::data::{AvatarData, AvatarType, Position};
use crate::avatar::source::{AvatarProvider, AvatarSource, acquire};
use crate::config::PipelineConfig;
use crate::foundation::core::{DeformRecord, PosRect};
use crate::foundation::error::{PetpetError, PetpetResult};
use crate::placement::resolver::{Placement, PositionMode, TemplateType, resolve_placement};
use crate::placement::tokens::PosTokens;
use crate::render::draw::{ZoomDrawParams, draw_deform_avatar, draw_zoom_avatar};
use crate::render::pool::WorkerPool;
use crate::transform::crop::{CropSpec, crop_image};
use crate::transform::fit::FitType;
use crate::transform::mask::convert_circular;
use crate::transform::resize::resize_exact;

/// A fully prepared avatar: placement resolved, frames cropped, styled, masked and resized.
///
/// Built once per placement request. Index accessors are pure; [`AvatarModel::next_frame`] is the
/// only stateful read and needs `&mut self`.
#[derive(Clone, Debug)]
pub struct AvatarModel {
    kind: AvatarType,
    template: TemplateType,
    pos_mode: PositionMode,
    placement: Placement,
    position: Vec<Position>,
    fit: FitType,
    angle: i16,
    opacity: f32,
    round: bool,
    rotate: bool,
    on_top: bool,
    antialias: bool,
    frames: Vec<RgbaImage>,
    cursor: usize,
}

impl AvatarModel {
    /// Run the transform pipeline over `source`.
    ///
    /// Coordinate expressions (placement and crop) see the raw first frame's size. Stages run in
    /// order: crop, style filters, circle mask, batch resize (ZOOM with resampling only).
    #[tracing::instrument(
        name = "avatar_build",
        skip_all,
        fields(role = ?data.kind, mode = ?data.pos_type, frames = source.len())
    )]
    pub fn build(
        data: &AvatarData,
        source: AvatarSource,
        template: TemplateType,
        config: &PipelineConfig,
        pool: &WorkerPool,
    ) -> PetpetResult<Self> {
        let antialias = config.antialias_for(data.antialias);
        let resampling = config.resampling_for(data.resampling);
        let (raw_w, raw_h) = source.first().dimensions();

        let placement = resolve_placement(data.pos_type, &data.pos, template, raw_w, raw_h)?;
        debug!(entries = placement.len(), "placement resolved");

        let mut frames = source.into_frames();

        if let Some(tokens) = data.crop.as_ref().filter(|t| has_entries(t)) {
            let spec = CropSpec::from_tokens(tokens, data.crop_type, raw_w, raw_h)?;
            frames = frames
                .iter()
                .map(|f| crop_image(f, &spec))
                .collect::<PetpetResult<_>>()?;
            debug!(corners = ?spec.corners, percent = spec.percent, "frames cropped");
        }

        for filter in &data.style {
            frames = frames.iter().map(|f| filter.apply(f)).collect();
            debug!(?filter, "style filter applied");
        }

        if data.round {
            frames = frames
                .iter()
                .map(|f| convert_circular(f, antialias))
                .collect();
            debug!(antialias, "circle mask applied");
        }

        if resampling
            && data.pos_type == PositionMode::Zoom
            && let Placement::Rects(rects) = &placement
        {
            let (max_w, max_h) = rects.max_size();
            frames = batch_resize(frames, max_w, max_h, pool)?;
        }

        Ok(Self {
            kind: data.kind,
            template,
            pos_mode: data.pos_type,
            placement,
            position: data.position.clone(),
            fit: data.fit,
            angle: data.angle,
            opacity: data.opacity,
            round: data.round,
            rotate: data.rotate,
            on_top: data.avatar_on_top,
            antialias,
            frames,
            cursor: 0,
        })
    }

    /// Acquire the source for `data`'s role, then [`AvatarModel::build`].
    pub fn from_provider(
        data: &AvatarData,
        provider: &dyn AvatarProvider,
        template: TemplateType,
        config: &PipelineConfig,
        pool: &WorkerPool,
    ) -> PetpetResult<Self> {
        let source = acquire(data, provider)?;
        Self::build(data, source, template, config, pool)
    }

    /// Number of prepared frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the avatar itself is animated.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Width of the first prepared frame.
    pub fn image_width(&self) -> u32 {
        self.frames[0].width()
    }

    /// Height of the first prepared frame.
    pub fn image_height(&self) -> u32 {
        self.frames[0].height()
    }

    /// Rectangle for output frame `index`, clamped to the last entry. `None` in DEFORM mode.
    pub fn rect(&self, index: usize) -> Option<PosRect> {
        match &self.placement {
            Placement::Rects(t) => Some(t.get(index)),
            Placement::Deform(_) => None,
        }
    }

    /// Number of placement entries.
    pub fn rect_len(&self) -> usize {
        self.placement.len()
    }

    /// Deform record for output frame `index`, wrapping. `None` outside DEFORM mode.
    pub fn deform(&self, index: usize) -> Option<&DeformRecord> {
        match &self.placement {
            Placement::Deform(t) => Some(t.get(index)),
            Placement::Rects(_) => None,
        }
    }

    /// Rotation for output frame `index`, in degrees.
    ///
    /// Without rotation this is the base angle. Static templates get a fresh random angle below
    /// `|base|` (or 360 when the base is 0) on every call. Animated templates step by
    /// `360 / entries` (integer division) per frame from the base, where `entries` is the
    /// placement table length: rectangles in ZOOM/MARGIN mode, deform records in DEFORM mode.
    pub fn angle(&self, index: usize) -> f32 {
        if !self.rotate {
            return f32::from(self.angle);
        }
        if !self.template.is_animated() {
            let bound = match self.angle.unsigned_abs() {
                0 => 360,
                b => b,
            };
            return f32::from(rand::thread_rng().gen_range(0..bound));
        }
        let step = 360 / self.placement.len() as i64;
        (step * index as i64 + i64::from(self.angle)) as f32
    }

    /// Frame `index`, wrapping modulo the frame count.
    pub fn frame(&self, index: usize) -> &RgbaImage {
        &self.frames[index % self.frames.len()]
    }

    /// Next frame of an internal cyclic cursor.
    pub fn next_frame(&mut self) -> &RgbaImage {
        if self.cursor >= self.frames.len() {
            self.cursor = 0;
        }
        let i = self.cursor;
        self.cursor += 1;
        &self.frames[i]
    }

    /// Every prepared frame in order.
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Resolved placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Placement mode.
    pub fn pos_mode(&self) -> PositionMode {
        self.pos_mode
    }

    /// Fit strategy for ZOOM draws.
    pub fn fit(&self) -> FitType {
        self.fit
    }

    /// Draw opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Circle-masked avatar.
    pub fn is_round(&self) -> bool {
        self.round
    }

    /// Per-frame rotation enabled.
    pub fn is_rotate(&self) -> bool {
        self.rotate
    }

    /// Draw above the template background.
    pub fn is_on_top(&self) -> bool {
        self.on_top
    }

    /// Effective antialias flag.
    pub fn is_antialias(&self) -> bool {
        self.antialias
    }

    /// Anchor hints.
    pub fn position(&self) -> &[Position] {
        &self.position
    }

    /// Avatar role.
    pub fn kind(&self) -> AvatarType {
        self.kind
    }

    /// Template type the model was built for.
    pub fn template_type(&self) -> TemplateType {
        self.template
    }

    /// Draw parameters for output frame `index` in ZOOM / MARGIN mode.
    pub fn zoom_params(&self, index: usize, multiple: f32) -> Option<ZoomDrawParams> {
        Some(ZoomDrawParams {
            rect: self.rect(index)?,
            angle: self.angle(index),
            round: self.round,
            multiple,
            fit: self.fit,
            opacity: self.opacity,
        })
    }

    /// Draw the avatar for output frame `index` onto `canvas`, dispatching on the placement mode.
    pub fn draw_onto(&self, canvas: &mut RgbaImage, index: usize, multiple: f32) -> PetpetResult<()> {
        let frame = self.frame(index);
        match &self.placement {
            Placement::Rects(_) => match self.zoom_params(index, multiple) {
                Some(params) => draw_zoom_avatar(canvas, frame, &params),
                None => Ok(()),
            },
            Placement::Deform(t) => draw_deform_avatar(canvas, frame, t.get(index), multiple),
        }
    }
}

fn has_entries(tokens: &PosTokens) -> bool {
    tokens.as_list().is_none_or(|l| !l.is_empty())
}

fn batch_resize(
    frames: Vec<RgbaImage>,
    width: i32,
    height: i32,
    pool: &WorkerPool,
) -> PetpetResult<Vec<RgbaImage>> {
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(PetpetError::resize(format!(
            "invalid resample target {width}x{height}"
        )));
    };
    debug!(width = w, height = h, tasks = frames.len(), "batch resize");
    if let [single] = frames.as_slice() {
        return Ok(vec![resize_exact(single, w, h)?]);
    }
    pool.scatter_join(&frames, |f| resize_exact(f, w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/model.rs"]
mod tests;
