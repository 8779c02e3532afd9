//! Parsing of complete TAP version 13 documents.
//!
//! A document starts with a `TAP version 13` line, followed by any number of test plan lines,
//! diagnostic lines and test result lines. Every test result line is followed by a YAML block
//! indented by [`yaml_indent`][Config#structfield.yaml_indent] spaces:
//!
//! ```text
//! TAP version 13
//! 1..2
//! # Subtest: arithmetic
//! ok 1 - addition
//!   ---
//!   duration_ms: 0.2
//!   ...
//! not ok 2 - division # todo
//!   ---
//!   message: division by zero
//!   ...
//! ```
//!
//! Parsing stops at the first line that does not match any of these, the remaining input is
//! ignored. Only a missing or unsupported version line makes parsing fail.
use std::io::Read;

use zeilen::{
    combinator::{sequence, zero_or_many_of, DEFAULT_ITER_LIMIT},
    Context, Failure, LineSource, Parser, Success,
};

use crate::{
    document::{Document, TapLine},
    error::ParseError,
    grammar::{tap_line, version},
};

/// Configuration for the TAP parser.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Config {
    /// Maximal number of lines following the version line that are parsed. Parsing stops once
    /// this many plan, diagnostic or test lines were parsed. (Default: `500`)
    pub line_limit: usize,
    /// Maximal number of lines scanned for the end of a YAML block. A longer block is a parse
    /// error. (Default: `10_000`)
    pub yaml_line_limit: usize,
    /// Indentation of the YAML block following a test result line. (Default: `2`)
    pub yaml_indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_ITER_LIMIT,
            yaml_line_limit: 10_000,
            yaml_indent: 2,
        }
    }
}

impl Config {
    #[inline]
    /// Sets the [`line_limit`][Self#structfield.line_limit] field.
    pub fn line_limit(mut self, value: usize) -> Self {
        self.line_limit = value;
        self
    }

    #[inline]
    /// Sets the [`yaml_line_limit`][Self#structfield.yaml_line_limit] field.
    pub fn yaml_line_limit(mut self, value: usize) -> Self {
        self.yaml_line_limit = value;
        self
    }

    #[inline]
    /// Sets the [`yaml_indent`][Self#structfield.yaml_indent] field.
    pub fn yaml_indent(mut self, value: usize) -> Self {
        self.yaml_indent = value;
        self
    }
}

/// Parses a TAP document starting at `context`.
///
/// On failure, the returned [`Failure`] refers to the position at which parsing could not
/// proceed.
pub fn parse_context<'src>(
    context: &Context<'src>,
    config: &Config,
) -> Result<Document, Failure<'src>> {
    tracing::debug!(line = context.position().line, ?config, "parsing TAP document");

    let document = sequence((
        version(),
        zero_or_many_of("lines", tap_line(config)).iter_limit(config.line_limit),
    ));

    let Success {
        token: (declared, lines),
        context: end,
    } = document.parse(context).into_result()?;

    let mut parsed = Document {
        version: declared,
        ..Document::default()
    };

    for line in lines {
        match line {
            TapLine::Plan(plan) => parsed.test_plan = Some(plan),
            TapLine::Diagnostic(text) => parsed.diagnostics.push(text),
            TapLine::Test(entry) => parsed.tests.push(entry),
        }
    }

    if !end.is_done() {
        tracing::debug!(
            line = end.position().line,
            "stopped before the end of the input"
        );
    }

    tracing::debug!(
        tests = parsed.tests.len(),
        diagnostics = parsed.diagnostics.len(),
        has_plan = parsed.test_plan.is_some(),
        "parsed TAP document"
    );

    Ok(parsed)
}

/// Parses a TAP document from a [`LineSource`].
pub fn parse_source<'src>(
    source: &'src LineSource,
    config: &Config,
) -> Result<Document, Failure<'src>> {
    parse_context(&source.context(), config)
}

/// Parses a TAP document from lines that are already split.
///
/// The lines are used verbatim, see [`LineSource::from_lines`].
pub fn parse_lines<I, S>(lines: I, config: &Config) -> Result<Document, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let source = LineSource::from_lines(lines);
    Ok(parse_source(&source, config)?)
}

/// Reads and parses a TAP document.
///
/// Trailing whitespace is removed from every line, see [`LineSource::from_buf_read`].
pub fn parse_read(read: impl Read, config: &Config) -> Result<Document, ParseError> {
    let source = LineSource::from_read(read)?;
    Ok(parse_source(&source, config)?)
}
