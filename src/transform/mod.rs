pub(crate) mod crop;
pub(crate) mod filters;
pub(crate) mod fit;
pub(crate) mod mask;
pub(crate) mod resize;
pub(crate) mod rotate;
pub(crate) mod sample;
pub(crate) mod warp;
