//! Parsers for the individual lines and blocks of TAP output.
//!
//! Every rule is a [`Parser`] built from [`regex_line`] and the combinators of
//! [`zeilen::combinator`]. The rules are combined into a whole document by
//! [`tap::parse_context`][crate::tap::parse_context].
use once_cell::sync::Lazy;
use regex::Regex;
use zeilen::{
    combinator::{any_of, indented, map_success, sequence},
    fail,
    line::regex_line,
    success,
    text::decimal,
    Context, Parsed, Parser, Success,
};

use crate::{
    document::{Directive, Plan, TapLine, TestEntry, TestTitle, YamlBlock, TAP_VERSION},
    tap::Config,
};

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^TAP version (\d{1,3})$").unwrap());

static PLAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\.(\d+)$").unwrap());

static DIAGNOSTIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^# (.+)").unwrap());

/// Groups: outcome, test number, description, comment following `#`.
static TEST_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ok|not ok)(?: +(\d+)\b)?(?: +([^#]+))?\s*(?:#(.*))?$").unwrap()
});

const YAML_START: &str = "---";
const YAML_END: &str = "...";

/// Matches a version line, `TAP version <n>`, accepting only the version `expected`.
///
/// A well-formed version line declaring a different version fails after the line.
pub fn version_rule<'src>(expected: u32) -> impl Parser<'src, Token = u32> {
    map_success(
        regex_line(&VERSION_REGEX, "Not a TAP version"),
        move |Success { token, context }| {
            let digits = token.group(1).unwrap_or_default();
            match decimal::<u32>(digits) {
                Some(received) if received == expected => success(context, expected),
                Some(received) => fail(
                    context,
                    format!("Unexpected TAP version: Expected {expected}, received {received}"),
                ),
                None => fail(
                    context,
                    format!("Unexpected TAP version: Expected {expected}, received {digits}"),
                ),
            }
        },
    )
}

/// Matches the version line of a TAP 13 document, `TAP version 13`.
pub fn version<'src>() -> impl Parser<'src, Token = u32> {
    version_rule(TAP_VERSION)
}

/// Matches a test plan line, `<start>..<through>`.
pub fn plan<'src>() -> impl Parser<'src, Token = Plan> {
    map_success(
        regex_line(&PLAN_REGEX, "Not a test plan"),
        |Success { token, context }| {
            let bounds = (
                token.group(1).and_then(decimal),
                token.group(2).and_then(decimal),
            );
            match bounds {
                (Some(start), Some(through)) => success(context, Plan { start, through }),
                _ => fail(context, "Test plan bounds are out of range"),
            }
        },
    )
}

/// Matches a diagnostic line, `# <text>`, and returns the text.
pub fn diagnostic<'src>() -> impl Parser<'src, Token = String> {
    map_success(
        regex_line(&DIAGNOSTIC_REGEX, "Not a diagnostic line"),
        |Success { token, context }| {
            success(context, token.group(1).unwrap_or_default().to_owned())
        },
    )
}

/// Matches a test result line, `(ok|not ok) [number] [description] [# directive]`.
///
/// When `#` is followed by whitespace and the word `todo` or `skip`, that word is the directive.
/// Any other comment, including other spellings such as `SKIP`, is ignored.
pub fn test_title<'src>() -> impl Parser<'src, Token = TestTitle> {
    map_success(
        regex_line(&TEST_TITLE_REGEX, "Not a tap test result line"),
        |Success { token, context }| {
            let ok = token.group(1) == Some("ok");

            let test_number = match token.group(2) {
                Some(digits) => match decimal::<u64>(digits) {
                    Some(number) => Some(number),
                    None => return fail(context, format!("Test number {digits} is out of range")),
                },
                None => None,
            };

            let description = token
                .group(3)
                .map(str::trim_end)
                .filter(|description| !description.is_empty())
                .map(str::to_owned);

            let word = token
                .group(4)
                .filter(|comment| comment.starts_with(char::is_whitespace))
                .and_then(|comment| comment.split_whitespace().next());

            let directive = match word {
                Some("todo") => Some(Directive::Todo),
                Some("skip") => Some(Directive::Skip),
                _ => None,
            };

            success(
                context,
                TestTitle {
                    ok,
                    test_number,
                    description,
                    directive,
                },
            )
        },
    )
}

/// Matches a YAML block delimited by a `---` and a `...` line.
///
/// The lines in between are returned verbatim. When the block is not terminated within
/// `line_limit` lines, or before the context is done, this fails at the `---` line.
///
/// This is usually run within an indentation scope, see [`test_entry`].
pub fn yaml_block<'src>(line_limit: usize) -> impl Parser<'src, Token = YamlBlock> {
    move |context: &Context<'src>| parse_yaml_block(context, line_limit)
}

fn parse_yaml_block<'src>(context: &Context<'src>, line_limit: usize) -> Parsed<'src, YamlBlock> {
    match context.line() {
        Some(YAML_START) => (),
        Some(line) => {
            return fail(
                context.clone(),
                format!("Expected a TAP YAML document separator (\"---\") but received {line}"),
            )
        }
        None => {
            return fail(
                context.clone(),
                "Expected a TAP YAML document separator (\"---\") but reached the end of the block",
            )
        }
    }

    let mut lines = vec![];

    for line_context in context.advance_line(1).iter_lines().take(line_limit) {
        let Some(line) = line_context.line() else {
            break;
        };
        if line == YAML_END {
            return success(line_context.advance_line(1), YamlBlock { lines });
        }
        lines.push(line.to_owned());
    }

    tracing::debug!(
        line = context.position().line,
        line_limit,
        scanned = lines.len(),
        "YAML block is not terminated"
    );

    fail(
        context.clone(),
        format!("Didn't encounter a YAML line delimiter before configured limit of {line_limit} lines."),
    )
}

/// Matches a test result line followed by its indented YAML block.
///
/// The indentation and line limit of the YAML block are taken from `config`.
pub fn test_entry<'src>(config: &Config) -> impl Parser<'src, Token = TestEntry> {
    map_success(
        sequence((
            test_title(),
            indented(config.yaml_indent, yaml_block(config.yaml_line_limit)),
        )),
        |Success {
             token: (title, yaml),
             context,
         }| success(context, TestEntry { title, yaml }),
    )
}

/// Matches any line that can follow the version line.
pub fn tap_line<'src>(config: &Config) -> impl Parser<'src, Token = TapLine> {
    any_of(
        "TAP Lines",
        (
            map_success(plan(), |Success { token, context }| {
                success(context, TapLine::Plan(token))
            }),
            map_success(diagnostic(), |Success { token, context }| {
                success(context, TapLine::Diagnostic(token))
            }),
            map_success(test_entry(config), |Success { token, context }| {
                success(context, TapLine::Test(token))
            }),
        ),
    )
}
