//! The Zeilen crate is a small parser-combinator library for line-oriented text formats.
//!
//! It targets formats where every line is a unit of meaning and where nested content is marked
//! by indentation, such as test protocol output with embedded YAML documents:
//!
//! * _Line based_: The input is read into a [`LineSource`] once, with trailing whitespace removed
//!   from every line. Parsers consume whole lines, usually by matching a line against a regular
//!   expression using [`line::regex_line`].
//!
//! * _Immutable positions_: A parser takes a [`Context`], an immutable cursor into the line
//!   source, and returns a [`Parsed`] value that contains a new context. As no parser mutates its
//!   input, trying an alternative after a failure never requires undoing anything.
//!
//! * _Indentation scopes_: [`Context::indented`] creates a view of an indented block in which
//!   the indentation is stripped and which ends at the first line that is not indented enough.
//!   This allows parsing indented content with the same parsers as top-level content.
//!
//! * _Error reporting_: Mismatches are [`Failure`] values carrying a message and the context at
//!   which parsing could not proceed. A failure can be turned into a
//!   [`SyntaxError`][text::SyntaxError] that reports a 1-based line and column.
//!
//! ## Using Zeilen
//!
//! Leaf parsers are plain functions, larger parsers are built using the [`combinator`] module:
//! ```rust
//! # use zeilen::*;
//! # use zeilen::combinator::*;
//! fn greeting<'src>(context: &Context<'src>) -> Parsed<'src, &'src str> {
//!     match context.line() {
//!         Some(line) if line.starts_with("hello") => success(context.advance_line(1), line),
//!         _ => fail(context.clone(), "Not a greeting"),
//!     }
//! }
//!
//! let source = LineSource::from_lines(["hello", "  hello world", "bye"]);
//! let parser = sequence((greeting, indented(2, greeting)));
//!
//! match parser.parse(&source.context()) {
//!     Parsed::Success(Success { token, context }) => {
//!         assert_eq!(token, ("hello", "hello world"));
//!         assert_eq!(context.line(), Some("bye"));
//!     }
//!     Parsed::Failure(failure) => panic!("{}", text::SyntaxError::from(failure)),
//! };
//! ```

#![warn(missing_docs)]
pub mod combinator;
mod context;
pub mod line;
mod parser;
mod source;
pub mod text;

pub use context::{Context, IndentedContext, Lines, Position, RootContext};
pub use parser::{fail, success, Failure, Parsed, Parser, Success};
pub use source::{LineSource, SourceError};
