//! This crate contains a parser for the output of test runners in the Test Anything Protocol
//! (TAP), version 13.
//!
//! See the [`tap`] module for parsing whole documents and the [`grammar`] module for the rules
//! matching individual lines. The parsed values are defined in the [`document`] module.
//!
//! ```rust
//! use zeilen_tap::{parse_lines, Config, Directive};
//!
//! let document = parse_lines(
//!     [
//!         "TAP version 13",
//!         "1..1",
//!         "ok 1 - widget # skip no widgets",
//!         "  ---",
//!         "  ...",
//!     ],
//!     &Config::default(),
//! )?;
//!
//! assert_eq!(document.tests[0].title.directive, Some(Directive::Skip));
//! # Ok::<(), zeilen_tap::ParseError>(())
//! ```

#![warn(missing_docs)]
pub mod document;
mod error;
pub mod grammar;
pub mod tap;

pub use document::{Directive, Document, Plan, TapLine, TestEntry, TestTitle, YamlBlock};
pub use error::{InnerParseError, ParseError, SourceError, SyntaxError};
pub use tap::{parse_context, parse_lines, parse_read, parse_source, Config};

#[cfg(test)]
mod tests;
