pub(crate) mod resolver;
pub(crate) mod table;
pub(crate) mod tokens;
