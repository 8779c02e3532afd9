//! Leaf parsers consuming a single line.
use regex::Regex;

use crate::{
    parser::{fail, success, Parser},
    Context, Parsed,
};

/// Capture groups of a line matched by [`regex_line`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RegexMatch<'src> {
    /// All capture groups, starting with the whole match at index `0`.
    ///
    /// Groups that did not participate in the match are `None`.
    pub groups: Vec<Option<&'src str>>,
}

impl<'src> RegexMatch<'src> {
    /// Returns the text of the capture group with the given index, if it participated in the match.
    #[inline]
    pub fn group(&self, index: usize) -> Option<&'src str> {
        self.groups.get(index).copied().flatten()
    }
}

/// Parser returned by [`regex_line`].
#[derive(Clone, Debug)]
pub struct RegexLine<'r> {
    regex: &'r Regex,
    message: String,
}

/// Matches the current line against `regex`.
///
/// On a match this consumes the line and returns its capture groups. Otherwise, and when the
/// context is done, it fails with `message` without advancing.
///
/// The regex is searched within the line, so it needs to be anchored to match whole lines only.
pub fn regex_line(regex: &Regex, message: impl Into<String>) -> RegexLine<'_> {
    RegexLine {
        regex,
        message: message.into(),
    }
}

impl<'src> Parser<'src> for RegexLine<'_> {
    type Token = RegexMatch<'src>;

    fn parse(&self, context: &Context<'src>) -> Parsed<'src, RegexMatch<'src>> {
        let Some(line) = context.line() else {
            return fail(context.clone(), self.message.clone());
        };
        match self.regex.captures(line) {
            Some(captures) => success(
                context.advance_line(1),
                RegexMatch {
                    groups: captures
                        .iter()
                        .map(|group| group.map(|group| group.as_str()))
                        .collect(),
                },
            ),
            None => fail(context.clone(), self.message.clone()),
        }
    }
}
