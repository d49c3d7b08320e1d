/// Convenience result type used across the crate.
pub type PetpetResult<T> = Result<T, PetpetError>;

/// Top-level error taxonomy for placement resolution, avatar transforms and drawing.
///
/// Every variant is fatal for the placement request that produced it.
#[derive(thiserror::Error, Debug)]
pub enum PetpetError {
    /// Malformed positional token, crop spec or crop geometry.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Position group with the wrong shape (element count or nesting).
    ///
    /// This is a configuration error that points at the template layout rather than at a single
    /// arithmetic token.
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// Avatar source unavailable (provider returned nothing, missing local file).
    #[error("acquisition error: {0}")]
    Acquisition(String),

    /// Degenerate quadrilateral passed to the warp primitive.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// A resize task failed while building the avatar frame set.
    #[error("resize error: {0}")]
    Resize(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PetpetError {
    /// Build a [`PetpetError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PetpetError::MalformedPosition`] value.
    pub fn malformed_position(msg: impl Into<String>) -> Self {
        Self::MalformedPosition(msg.into())
    }

    /// Build a [`PetpetError::Acquisition`] value.
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    /// Build a [`PetpetError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`PetpetError::Resize`] value.
    pub fn resize(msg: impl Into<String>) -> Self {
        Self::Resize(msg.into())
    }

    /// Return `true` for errors caused by template configuration (tokens, shapes, crop).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::MalformedPosition(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
