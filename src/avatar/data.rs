use crate::foundation::error::{PetpetError, PetpetResult};
use crate::placement::resolver::PositionMode;
use crate::placement::tokens::PosTokens;
use crate::transform::crop::CropType;
use crate::transform::filters::StyleFilter;
use crate::transform::fit::FitType;

/// Which avatar a template slot is filled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AvatarType {
    /// The user who issued the request.
    From,
    /// The user the request targets.
    To,
    /// The group the request was issued in.
    Group,
    /// The bot itself.
    Bot,
    /// A random group member.
    Random,
    /// A file on disk named by `localName`.
    Local,
}

/// Layout anchor hint carried through for the template layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Centered.
    Center,
}

/// One avatar slot of a template, as written in the template's JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarData {
    /// Avatar role.
    #[serde(rename = "type")]
    pub kind: AvatarType,
    /// Positional token tree; its shape depends on `pos_type` and the template type.
    #[serde(default = "default_pos")]
    pub pos: PosTokens,
    /// Placement mode.
    #[serde(default)]
    pub pos_type: PositionMode,
    /// Anchor hints.
    #[serde(default = "default_position")]
    pub position: Vec<Position>,
    /// Crop corners as `[w, h]` or `[x1, y1, x2, y2]` tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<PosTokens>,
    /// Interpretation of `crop`.
    #[serde(default)]
    pub crop_type: CropType,
    /// Aspect-ratio strategy for ZOOM draws.
    #[serde(default)]
    pub fit: FitType,
    /// Style filters in application order.
    #[serde(default)]
    pub style: Vec<StyleFilter>,
    /// Base rotation in degrees.
    #[serde(default)]
    pub angle: i16,
    /// Draw opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Circle-mask the avatar.
    #[serde(default)]
    pub round: bool,
    /// Path read for [`AvatarType::Local`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    /// Enable per-frame rotation.
    #[serde(default)]
    pub rotate: bool,
    /// Draw above the template background instead of below it.
    #[serde(default = "default_true")]
    pub avatar_on_top: bool,
    /// Antialias override; falls back to the pipeline config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antialias: Option<bool>,
    /// Resampling override; falls back to the pipeline config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resampling: Option<bool>,
}

fn default_pos() -> PosTokens {
    PosTokens::scalars([0, 0, 100, 100])
}

fn default_position() -> Vec<Position> {
    vec![Position::Left, Position::Top]
}

fn default_opacity() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl AvatarData {
    /// Defaults for every field except the role.
    pub fn new(kind: AvatarType) -> Self {
        Self {
            kind,
            pos: default_pos(),
            pos_type: PositionMode::default(),
            position: default_position(),
            crop: None,
            crop_type: CropType::default(),
            fit: FitType::default(),
            style: Vec::new(),
            angle: 0,
            opacity: default_opacity(),
            round: false,
            local_name: None,
            rotate: false,
            avatar_on_top: true,
            antialias: None,
            resampling: None,
        }
    }

    /// Parse one avatar entry from JSON.
    pub fn from_json(json: &str) -> PetpetResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PetpetError::configuration(format!("invalid avatar data: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/data.rs"]
mod tests;
