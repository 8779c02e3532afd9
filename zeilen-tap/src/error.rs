pub use zeilen::{text::SyntaxError, SourceError};
use thiserror::Error;
use zeilen::Failure;

/// Either a [`SyntaxError`] or a [`SourceError`].
///
/// This is used via [`ParseError`], which wraps this in a [`Box`].
#[derive(Error, Debug)]
pub enum InnerParseError {
    /// A syntax error containing a message and a source location.
    #[error(transparent)]
    SyntaxError(SyntaxError),
    /// The input could not be read as lines of text.
    #[error(transparent)]
    SourceError(SourceError),
}

/// Boxed version of [`InnerParseError`].
pub type ParseError = Box<InnerParseError>;

impl From<SourceError> for ParseError {
    fn from(err: SourceError) -> Self {
        Box::new(InnerParseError::SourceError(err))
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        Box::new(InnerParseError::SyntaxError(err))
    }
}

impl From<Failure<'_>> for ParseError {
    fn from(failure: Failure<'_>) -> Self {
        Self::from(SyntaxError::from(failure))
    }
}
