use crate::expression::eval::resolve_coord;
use crate::foundation::core::{Anchor, DeformRecord, Point, PosRect, Quad};
use crate::foundation::error::{PetpetError, PetpetResult};
use crate::placement::table::{DeformTable, RectTable};
use crate::placement::tokens::PosTokens;

const RECT_ARITY: usize = 4;
const QUAD_CORNERS: usize = 4;
const DEFORM_ARITY: usize = QUAD_CORNERS + 1;

/// How an avatar's position tokens are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionMode {
    /// Axis-aligned `(x, y, w, h)` rectangles; eligible for batch resampling.
    #[default]
    Zoom,
    /// Axis-aligned `(x, y, w, h)` rectangles.
    Margin,
    /// Quadrilateral corners plus an anchor.
    Deform,
}

/// Whether the template is a single image or a frame sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemplateType {
    /// Animated template; one position entry per output frame.
    Gif,
    /// Single-image template.
    #[default]
    Img,
}

impl TemplateType {
    /// Return `true` for animated templates.
    pub fn is_animated(self) -> bool {
        matches!(self, Self::Gif)
    }
}

/// Resolved placement geometry for every output frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "table", rename_all = "snake_case")]
pub enum Placement {
    /// ZOOM / MARGIN rectangles.
    Rects(RectTable),
    /// DEFORM quads.
    Deform(DeformTable),
}

impl Placement {
    /// Number of stored entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Rects(t) => t.len(),
            Self::Deform(t) => t.len(),
        }
    }

    /// Always `false`; placements are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve a position token tree into per-frame placement geometry.
///
/// `width` and `height` bind the expression variables of every coordinate token.
pub fn resolve_placement(
    mode: PositionMode,
    tokens: &PosTokens,
    template: TemplateType,
    width: u32,
    height: u32,
) -> PetpetResult<Placement> {
    match mode {
        PositionMode::Zoom | PositionMode::Margin => {
            resolve_rects(tokens, template, width, height).map(Placement::Rects)
        }
        PositionMode::Deform => {
            resolve_deform(tokens, template, width, height).map(Placement::Deform)
        }
    }
}

fn resolve_rects(
    tokens: &PosTokens,
    template: TemplateType,
    width: u32,
    height: u32,
) -> PetpetResult<RectTable> {
    let rects = match template {
        TemplateType::Gif => {
            let frames = tokens.as_list().ok_or_else(|| {
                PetpetError::malformed_position("animated position must be a list of groups")
            })?;
            frames
                .iter()
                .enumerate()
                .map(|(i, group)| parse_rect(group, i, width, height))
                .collect::<PetpetResult<Vec<_>>>()?
        }
        TemplateType::Img => vec![parse_rect(tokens, 0, width, height)?],
    };
    RectTable::new(rects)
}

fn parse_rect(group: &PosTokens, index: usize, width: u32, height: u32) -> PetpetResult<PosRect> {
    let v = flat_group(group, RECT_ARITY, || format!("position group {index}"), width, height)?;
    Ok(PosRect::new(v[0], v[1], v[2], v[3]))
}

fn resolve_deform(
    tokens: &PosTokens,
    template: TemplateType,
    width: u32,
    height: u32,
) -> PetpetResult<DeformTable> {
    // [[x,y] x5] has depth 2, [[[x,y] x5], ...] has depth 3.
    let depth = tokens.leading_depth();
    let records = match (depth, template) {
        (2, _) => vec![parse_deform_record(tokens, 0, width, height)?],
        (3, TemplateType::Gif) => tokens
            .as_list()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, frame)| parse_deform_record(frame, i, width, height))
            .collect::<PetpetResult<Vec<_>>>()?,
        (3, TemplateType::Img) => {
            return Err(PetpetError::malformed_position(
                "single-image template expects one deform record, got a per-frame table",
            ));
        }
        (d, _) => {
            return Err(PetpetError::malformed_position(format!(
                "deform position must be [[x,y] x{DEFORM_ARITY}] or a list of those (nesting depth {d})"
            )));
        }
    };
    DeformTable::new(records)
}

fn parse_deform_record(
    record: &PosTokens,
    index: usize,
    width: u32,
    height: u32,
) -> PetpetResult<DeformRecord> {
    let pairs = record
        .as_list()
        .filter(|v| v.len() == DEFORM_ARITY)
        .ok_or_else(|| {
            PetpetError::malformed_position(format!(
                "deform record {index} must contain {DEFORM_ARITY} coordinate pairs"
            ))
        })?;

    let mut resolved = [(0i32, 0i32); DEFORM_ARITY];
    for (slot, pair) in resolved.iter_mut().zip(pairs) {
        let v = flat_group(pair, 2, || format!("deform record {index} pair"), width, height)?;
        *slot = (v[0], v[1]);
    }

    let corners = [0, 1, 2, 3].map(|i| {
        let (x, y) = resolved[i];
        Point::new(f64::from(x), f64::from(y))
    });
    let (ax, ay) = resolved[QUAD_CORNERS];
    Ok(DeformRecord {
        quad: Quad::new(corners),
        anchor: Anchor::new(ax, ay),
    })
}

fn flat_group(
    group: &PosTokens,
    arity: usize,
    what: impl Fn() -> String,
    width: u32,
    height: u32,
) -> PetpetResult<Vec<i32>> {
    let items = match group.as_list() {
        Some(items) if group.is_flat_list() => items,
        _ => {
            return Err(PetpetError::malformed_position(format!(
                "{} must be a flat list of {arity} tokens",
                what()
            )));
        }
    };
    if items.len() != arity {
        return Err(PetpetError::malformed_position(format!(
            "{} has {} entries, expected {arity}",
            what(),
            items.len()
        )));
    }
    items
        .iter()
        .filter_map(PosTokens::as_scalar)
        .map(|t| resolve_coord(t, width, height))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/placement/resolver.rs"]
mod tests;
