use std::io::{self, BufRead, BufReader, Read};

use bstr::{io::BufReadExt, ByteSlice};
use thiserror::Error;

use crate::Context;

/// Error produced while turning an input stream into a [`LineSource`].
///
/// These are fatal input errors and not parse failures. Parsing never starts when reading the
/// input fails.
#[derive(Error, Debug)]
pub enum SourceError {
    /// An IO error of the underlying reader.
    #[error("IO error while reading input: {}", .0)]
    Io(#[from] io::Error),
    /// The input contained a line that is not valid UTF-8 text.
    #[error("input line {line} is not valid UTF-8 text")]
    NotText {
        /// The offending line, starting at `1`.
        line: usize,
        /// The decoding error.
        #[source]
        source: bstr::Utf8Error,
    },
}

/// An immutable, ordered sequence of input lines.
///
/// All [`Context`] values created for a parse borrow the same `LineSource`, which is never
/// modified after construction.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LineSource {
    lines: Vec<String>,
}

impl std::fmt::Debug for LineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineSource")
            .field("len", &self.lines.len())
            .finish_non_exhaustive()
    }
}

impl LineSource {
    /// Creates a `LineSource` from lines that are already split.
    ///
    /// The lines are stored verbatim, no whitespace is stripped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads all lines of a [`Read`] instance.
    ///
    /// If the [`Read`] instance is a [`BufReader`], it is better to use
    /// [`from_buf_read`][Self::from_buf_read] to avoid unnecessary double buffering of the data.
    pub fn from_read(read: impl Read) -> Result<Self, SourceError> {
        Self::from_buf_read(BufReader::new(read))
    }

    /// Reads all lines of a [`BufRead`] instance.
    ///
    /// Lines are split at `"\n"` (a preceding `"\r"` is dropped as well) and trailing whitespace
    /// is stripped from every line. A line that is not valid UTF-8 aborts reading with
    /// [`SourceError::NotText`].
    pub fn from_buf_read(read: impl BufRead) -> Result<Self, SourceError> {
        let mut lines = vec![];

        for (index, line) in read.byte_lines().enumerate() {
            let line = line?;
            let text = line.to_str().map_err(|source| SourceError::NotText {
                line: index + 1,
                source,
            })?;
            lines.push(text.trim_end().to_owned());
        }

        tracing::trace!(lines = lines.len(), "buffered input lines");

        Ok(Self { lines })
    }

    /// Number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` when there are no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line with the given 0-based index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns a context positioned at the first line.
    pub fn context(&self) -> Context<'_> {
        Context::new(self)
    }
}

impl<S: Into<String>> FromIterator<S> for LineSource {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}
