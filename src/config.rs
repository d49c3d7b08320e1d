use crate::foundation::error::{PetpetError, PetpetResult};

/// Service-wide pipeline settings.
///
/// Per-avatar `antialias` / `resampling` values override the first two fields.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Antialias circle masks when the avatar entry does not say otherwise.
    pub antialias: bool,
    /// Pre-resize ZOOM avatars to the largest placement rectangle.
    pub resampling: bool,
    /// Worker thread count for batch resize. `None` uses available parallelism.
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            resampling: true,
            threads: None,
        }
    }
}

impl PipelineConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> PetpetResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| PetpetError::configuration(format!("invalid pipeline config: {e}")))?;
        if cfg.threads == Some(0) {
            return Err(PetpetError::configuration(
                "pipeline config 'threads' must be >= 1 when set",
            ));
        }
        Ok(cfg)
    }

    /// Resolve the effective antialias flag for an avatar entry.
    pub fn antialias_for(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.antialias)
    }

    /// Resolve the effective resampling flag for an avatar entry.
    pub fn resampling_for(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.resampling)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
