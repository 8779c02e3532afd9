//! Combinators composing [`Parser`]s into larger parsers.
//!
//! All combinators are grammar-agnostic. They only thread [`Context`] values between the parsers
//! they wrap and decide which [`Parsed`] value to return:
//!
//! * [`sequence`] runs a tuple of parsers one after another and fails with the first failure.
//! * [`any_of`] tries a tuple of alternative parsers at the same context and returns the first
//!   success.
//! * [`zero_or_many_of`] repeats a parser as long as it matches. It never fails.
//! * [`map_success`] post-processes a success, possibly turning it into a failure.
//! * [`indented`] runs a parser within an indentation scope.
use crate::{
    parser::{fail, success, Parser, Success},
    Context, Parsed,
};

/// Number of repetitions after which [`zero_or_many_of`] stops unless configured otherwise.
pub const DEFAULT_ITER_LIMIT: usize = 500;

/// Tuples of parsers that can be run in sequence. See [`sequence`].
pub trait SequenceOf<'src> {
    /// Tuple of the tokens produced by the parsers.
    type Tokens;

    /// Runs all parsers in order.
    fn parse_sequence(&self, context: &Context<'src>) -> Parsed<'src, Self::Tokens>;
}

/// Tuples of parsers producing the same token type that can be tried in order. See [`any_of`].
pub trait Alternatives<'src> {
    /// The token produced by every alternative.
    type Token;

    /// Returns the first success, trying every parser at `context`.
    fn first_success(&self, context: &Context<'src>) -> Option<Success<'src, Self::Token>>;
}

macro_rules! tuple_impls {
    ($($parser:ident $index:tt),+) => {
        impl<'src, $($parser),+> SequenceOf<'src> for ($($parser,)+)
        where
            $($parser: Parser<'src>,)+
        {
            type Tokens = ($($parser::Token,)+);

            fn parse_sequence(&self, context: &Context<'src>) -> Parsed<'src, Self::Tokens> {
                let mut context = context.clone();
                let tokens = ($(
                    match self.$index.parse(&context) {
                        Parsed::Success(Success { token, context: next }) => {
                            context = next;
                            token
                        }
                        Parsed::Failure(failure) => return Parsed::Failure(failure),
                    },
                )+);
                success(context, tokens)
            }
        }

        impl<'src, T, $($parser),+> Alternatives<'src> for ($($parser,)+)
        where
            $($parser: Parser<'src, Token = T>,)+
        {
            type Token = T;

            fn first_success(&self, context: &Context<'src>) -> Option<Success<'src, T>> {
                $(
                    if let Parsed::Success(success) = self.$index.parse(context) {
                        return Some(success);
                    }
                )+
                None
            }
        }
    };
}

tuple_impls!(A 0);
tuple_impls!(A 0, B 1);
tuple_impls!(A 0, B 1, C 2);
tuple_impls!(A 0, B 1, C 2, D 3);
tuple_impls!(A 0, B 1, C 2, D 3, E 4);
tuple_impls!(A 0, B 1, C 2, D 3, E 4, F 5);

/// Parser returned by [`sequence`].
#[derive(Clone, Debug)]
pub struct Sequence<S> {
    parsers: S,
}

/// Runs a tuple of parsers left to right, each starting where the previous one stopped.
///
/// On success this returns the tuple of all tokens and the context after the last parser. The
/// first failure is returned unchanged and the remaining parsers are not run.
pub fn sequence<S>(parsers: S) -> Sequence<S> {
    Sequence { parsers }
}

impl<'src, S> Parser<'src> for Sequence<S>
where
    S: SequenceOf<'src>,
{
    type Token = S::Tokens;

    #[inline]
    fn parse(&self, context: &Context<'src>) -> Parsed<'src, Self::Token> {
        self.parsers.parse_sequence(context)
    }
}

/// Parser returned by [`any_of`].
#[derive(Clone, Debug)]
pub struct AnyOf<A> {
    label: String,
    alternatives: A,
}

/// Tries a tuple of parsers in order, each at the same context, and returns the first success.
///
/// Parsers after the first success are not run. When no parser matches, the individual failures
/// are discarded and a single failure at the original context is returned, with the message
/// `Failed to match any parser in sequence "<label>"`.
pub fn any_of<A>(label: impl Into<String>, alternatives: A) -> AnyOf<A> {
    AnyOf {
        label: label.into(),
        alternatives,
    }
}

impl<'src, A> Parser<'src> for AnyOf<A>
where
    A: Alternatives<'src>,
{
    type Token = A::Token;

    fn parse(&self, context: &Context<'src>) -> Parsed<'src, Self::Token> {
        match self.alternatives.first_success(context) {
            Some(matched) => Parsed::Success(matched),
            None => {
                tracing::trace!(
                    label = %self.label,
                    line = context.position().line,
                    "no alternative matched"
                );
                fail(
                    context.clone(),
                    format!("Failed to match any parser in sequence \"{}\"", self.label),
                )
            }
        }
    }
}

/// Parser returned by [`zero_or_many_of`].
#[derive(Clone, Debug)]
pub struct ZeroOrMany<P> {
    tag: &'static str,
    parser: P,
    iter_limit: usize,
}

/// Repeatedly applies `parser`, collecting the tokens of all successes.
///
/// Repetition stops when the context is exhausted, after [`iter_limit`][ZeroOrMany::iter_limit]
/// attempts or at the first failure. This never fails: zero matches is an empty success. When
/// stopped by a failure, the returned context is the failing attempt's context and its message is
/// discarded.
///
/// The `tag` only names the repetition in log output.
pub fn zero_or_many_of<P>(tag: &'static str, parser: P) -> ZeroOrMany<P> {
    ZeroOrMany {
        tag,
        parser,
        iter_limit: DEFAULT_ITER_LIMIT,
    }
}

impl<P> ZeroOrMany<P> {
    /// Sets the maximal number of attempts. (Default: [`DEFAULT_ITER_LIMIT`])
    #[inline]
    pub fn iter_limit(mut self, value: usize) -> Self {
        self.iter_limit = value;
        self
    }
}

impl<'src, P> Parser<'src> for ZeroOrMany<P>
where
    P: Parser<'src>,
{
    type Token = Vec<P::Token>;

    fn parse(&self, context: &Context<'src>) -> Parsed<'src, Self::Token> {
        let mut tokens = vec![];
        let mut context = context.clone();
        let mut iterations = 0;

        while !context.is_done() && iterations < self.iter_limit {
            iterations += 1;
            match self.parser.parse(&context) {
                Parsed::Success(Success { token, context: next }) => {
                    tokens.push(token);
                    context = next;
                }
                Parsed::Failure(failure) => {
                    tracing::trace!(
                        tag = self.tag,
                        matches = tokens.len(),
                        line = failure.context.position().line,
                        reason = %failure.message,
                        "repetition stopped"
                    );
                    return success(failure.context, tokens);
                }
            }
        }

        if iterations == self.iter_limit && !context.is_done() {
            tracing::debug!(
                tag = self.tag,
                iter_limit = self.iter_limit,
                line = context.position().line,
                "repetition reached its iteration limit"
            );
        }

        success(context, tokens)
    }
}

/// Parser returned by [`map_success`].
#[derive(Clone, Debug)]
pub struct MapSuccess<P, F> {
    parser: P,
    f: F,
}

/// Passes every success of `parser` through `f`.
///
/// `f` can transform the token and context or turn the success into a failure, e.g. to validate
/// the parsed input. Failures of `parser` are returned unchanged and `f` is not called.
pub fn map_success<'src, P, F, T>(parser: P, f: F) -> MapSuccess<P, F>
where
    P: Parser<'src>,
    F: Fn(Success<'src, P::Token>) -> Parsed<'src, T>,
{
    MapSuccess { parser, f }
}

impl<'src, P, F, T> Parser<'src> for MapSuccess<P, F>
where
    P: Parser<'src>,
    F: Fn(Success<'src, P::Token>) -> Parsed<'src, T>,
{
    type Token = T;

    #[inline]
    fn parse(&self, context: &Context<'src>) -> Parsed<'src, T> {
        self.parser.parse(context).and_then(&self.f)
    }
}

/// Parser returned by [`indented`].
#[derive(Clone, Debug)]
pub struct Indented<P> {
    indent_level: usize,
    parser: P,
}

/// Runs `parser` on the block indented by `indent_level` spaces starting at the current line.
///
/// The parser sees the block's lines with the indentation removed and sees the block as ending at
/// the first line that is not indented enough. On success the returned context is taken out of
/// the indentation scope again, so parsing can continue at the enclosing level. Failures are
/// returned unchanged.
pub fn indented<P>(indent_level: usize, parser: P) -> Indented<P> {
    Indented {
        indent_level,
        parser,
    }
}

impl<'src, P> Parser<'src> for Indented<P>
where
    P: Parser<'src>,
{
    type Token = P::Token;

    fn parse(&self, context: &Context<'src>) -> Parsed<'src, Self::Token> {
        match self.parser.parse(&context.indented(self.indent_level)) {
            Parsed::Success(Success { token, context }) => success(context.unindented(), token),
            failure => failure,
        }
    }
}
