/// Syntax error in a coordinate expression, located by byte offset into the token text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("bad coordinate syntax at byte {offset}: {message}")]
pub(crate) struct ExprError {
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl ExprError {
    pub(crate) fn at(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
