pub(crate) mod data;
pub(crate) mod model;
pub(crate) mod source;
