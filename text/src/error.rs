use thiserror::Error;

/// Errors raised by the text formatting layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("Line width must be greater than 2.")]
    LineWidthTooSmall(usize),
    #[error("No more indentations to pop.")]
    NoIndentation,
    #[error("Invalid split rule: '{0}'")]
    InvalidSplitRule(String),
}
