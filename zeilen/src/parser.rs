use thiserror::Error;

use crate::Context;

/// A successfully parsed token together with the context right after the consumed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success<'src, T> {
    /// The parsed token.
    pub token: T,
    /// The position immediately after the consumed input.
    pub context: Context<'src>,
}

/// A failed parse attempt.
///
/// The context is where the mismatch was detected. This is not necessarily the context the
/// parser was started with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Failure<'src> {
    /// Describes what was expected.
    pub message: String,
    /// The position at which parsing could not proceed.
    pub context: Context<'src>,
}

/// Result of running a [`Parser`].
///
/// Expected mismatches of the input are always reported as a [`Failure`] value, parsers never
/// panic on unexpected input. Convert into a plain [`Result`] with
/// [`into_result`][Self::into_result] to use `?`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<'src, T> {
    /// The input matched.
    Success(Success<'src, T>),
    /// The input did not match.
    Failure(Failure<'src>),
}

/// Creates a successful result.
#[inline]
pub fn success<T>(context: Context<'_>, token: T) -> Parsed<'_, T> {
    Parsed::Success(Success { token, context })
}

/// Creates a failed result.
#[inline]
pub fn fail<'src, T>(context: Context<'src>, message: impl Into<String>) -> Parsed<'src, T> {
    Parsed::Failure(Failure {
        message: message.into(),
        context,
    })
}

impl<'src, T> Parsed<'src, T> {
    /// Returns whether the input matched.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Parsed::Success(_))
    }

    /// The context of the success or failure.
    pub fn context(&self) -> &Context<'src> {
        match self {
            Parsed::Success(success) => &success.context,
            Parsed::Failure(failure) => &failure.context,
        }
    }

    /// Replaces a successfully parsed token with the value returned when applying the function `f`
    /// to it.
    ///
    /// A failure is returned unchanged.
    #[inline]
    pub fn map<T2>(self, f: impl FnOnce(T) -> T2) -> Parsed<'src, T2> {
        match self {
            Parsed::Success(Success { token, context }) => success(context, f(token)),
            Parsed::Failure(failure) => Parsed::Failure(failure),
        }
    }

    /// Replaces the message of a failure with the value returned when applying `f` to the
    /// failure.
    ///
    /// A success is returned unchanged.
    #[inline]
    pub fn map_failure(self, f: impl FnOnce(&Failure<'src>) -> String) -> Self {
        match self {
            Parsed::Failure(failure) => Parsed::Failure(Failure {
                message: f(&failure),
                context: failure.context,
            }),
            parsed => parsed,
        }
    }

    /// Passes a success to `f`, which may transform it or turn it into a failure.
    ///
    /// A failure is returned unchanged without calling `f`.
    #[inline]
    pub fn and_then<T2>(
        self,
        f: impl FnOnce(Success<'src, T>) -> Parsed<'src, T2>,
    ) -> Parsed<'src, T2> {
        match self {
            Parsed::Success(parsed) => f(parsed),
            Parsed::Failure(failure) => Parsed::Failure(failure),
        }
    }

    /// Converts into a [`Result`].
    #[inline]
    pub fn into_result(self) -> Result<Success<'src, T>, Failure<'src>> {
        match self {
            Parsed::Success(success) => Ok(success),
            Parsed::Failure(failure) => Err(failure),
        }
    }
}

impl<'src, T> From<Result<Success<'src, T>, Failure<'src>>> for Parsed<'src, T> {
    #[inline]
    fn from(result: Result<Success<'src, T>, Failure<'src>>) -> Self {
        match result {
            Ok(success) => Parsed::Success(success),
            Err(failure) => Parsed::Failure(failure),
        }
    }
}

/// A parser producing tokens of type [`Token`][Self::Token].
///
/// Parsers take a [`Context`] and return a [`Parsed`] value. As contexts are immutable, a parser
/// can be retried or replaced by an alternative using the same context, without any need for
/// explicit backtracking.
///
/// This is implemented for all functions and closures of the matching signature, so plain
/// functions can be used as leaf parsers and passed to the combinators of the
/// [`combinator`][crate::combinator] module.
pub trait Parser<'src> {
    /// The token produced on success.
    type Token;

    /// Runs the parser at `context`.
    fn parse(&self, context: &Context<'src>) -> Parsed<'src, Self::Token>;
}

impl<'src, T, F> Parser<'src> for F
where
    F: Fn(&Context<'src>) -> Parsed<'src, T>,
{
    type Token = T;

    #[inline]
    fn parse(&self, context: &Context<'src>) -> Parsed<'src, T> {
        self(context)
    }
}
