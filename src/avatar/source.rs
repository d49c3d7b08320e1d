use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use crate::assets::decode::decode_path;
use crate::avatar::data::{AvatarData, AvatarType};
use crate::foundation::error::{PetpetError, PetpetResult};

/// Ordered, non-empty avatar frame sequence. One frame is a static image.
#[derive(Clone, Debug, PartialEq)]
pub struct AvatarSource {
    frames: Vec<RgbaImage>,
}

impl AvatarSource {
    /// Wrap decoded frames. Empty input is an acquisition error.
    pub fn new(frames: Vec<RgbaImage>) -> PetpetResult<Self> {
        if frames.is_empty() {
            return Err(PetpetError::acquisition("avatar source has no frames"));
        }
        Ok(Self { frames })
    }

    /// Single static frame.
    pub fn single(frame: RgbaImage) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// First frame; sizes coordinate expressions.
    pub fn first(&self) -> &RgbaImage {
        &self.frames[0]
    }

    /// Borrow every frame.
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Take ownership of the frames.
    pub fn into_frames(self) -> Vec<RgbaImage> {
        self.frames
    }
}

/// Supplies avatar frames for the request-scoped roles.
pub trait AvatarProvider {
    /// Frames for `role`, or `None` when the request carries no such avatar.
    fn frames(&self, role: AvatarType) -> Option<Vec<RgbaImage>>;
}

/// In-memory [`AvatarProvider`] keyed by role.
#[derive(Clone, Debug, Default)]
pub struct ProviderMap {
    by_role: HashMap<AvatarType, Vec<RgbaImage>>,
}

impl ProviderMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register frames for a role, replacing earlier ones.
    pub fn with(mut self, role: AvatarType, frames: Vec<RgbaImage>) -> Self {
        self.by_role.insert(role, frames);
        self
    }

    /// Register frames for a role in place.
    pub fn insert(&mut self, role: AvatarType, frames: Vec<RgbaImage>) {
        self.by_role.insert(role, frames);
    }
}

impl AvatarProvider for ProviderMap {
    fn frames(&self, role: AvatarType) -> Option<Vec<RgbaImage>> {
        self.by_role.get(&role).cloned()
    }
}

/// Fetch the raw frames for `data`'s role.
///
/// [`AvatarType::Local`] reads `localName` from disk; every other role asks `provider`.
pub fn acquire(data: &AvatarData, provider: &dyn AvatarProvider) -> PetpetResult<AvatarSource> {
    let frames = match data.kind {
        AvatarType::Local => {
            let Some(name) = data.local_name.as_deref() else {
                tracing::warn!("local avatar without localName");
                return Err(PetpetError::acquisition("LOCAL avatar has no localName"));
            };
            decode_path(Path::new(name)).map_err(|e| {
                tracing::warn!(path = name, error = %e, "local avatar unreadable");
                PetpetError::acquisition(format!("local avatar '{name}': {e}"))
            })?
        }
        role => provider.frames(role).ok_or_else(|| {
            tracing::warn!(?role, "no avatar supplied for role");
            PetpetError::acquisition(format!("no avatar supplied for {role:?}"))
        })?,
    };
    AvatarSource::new(frames).inspect_err(|_| {
        tracing::warn!(role = ?data.kind, "avatar provider returned no frames");
    })
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/source.rs"]
mod tests;
