//! Utilities for reporting errors and parsing values of text based formats.
use std::fmt;

use num_traits::{
    ops::overflowing::{OverflowingAdd, OverflowingMul},
    FromPrimitive, Zero,
};

use crate::Failure;

/// Parses a string of ASCII digits as decimal number.
///
/// Returns `None` when `digits` is empty, contains anything but ASCII digits or when the value
/// overflows `I`.
#[inline]
pub fn decimal<I>(digits: &str) -> Option<I>
where
    I: Zero + FromPrimitive + OverflowingAdd + OverflowingMul,
{
    if digits.is_empty() {
        return None;
    }

    let ten = I::from_u8(10)?;
    let mut value = I::zero();
    let mut overflow = false;

    for byte in digits.bytes() {
        let digit @ b'0'..=b'9' = byte else {
            return None;
        };

        let (new_value, overflowed) = value.overflowing_mul(&ten);
        overflow |= overflowed;
        value = new_value;

        let (new_value, overflowed) = value.overflowing_add(&I::from_u8(digit - b'0')?);
        overflow |= overflowed;
        value = new_value;
    }

    (!overflow).then_some(value)
}

/// Source location consisting of a line and column number.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct LineColumn {
    /// The source line.
    ///
    /// This follows the convention where the first line is line `1`.
    pub line: usize,
    /// The (byte based) source column.
    ///
    /// Within an indented block this includes the block's indentation. This follows the
    /// convention where the first column is column `1`.
    pub column: usize,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A simple syntax error type for text based formats.
///
/// Unlike a [`Failure`], this does not borrow the parsed input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxError {
    /// The source location of the error.
    pub location: LineColumn,
    /// The error message.
    pub msg: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.msg)
    }
}

impl std::error::Error for SyntaxError {}

impl From<Failure<'_>> for SyntaxError {
    fn from(failure: Failure<'_>) -> Self {
        let position = failure.context.position();
        SyntaxError {
            location: LineColumn {
                line: position.line + 1,
                column: position.column + 1,
            },
            msg: failure.message,
        }
    }
}
