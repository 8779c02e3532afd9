//! Immutable cursors over a [`LineSource`].
//!
//! A [`Context`] marks a position in a line source. It is never modified: advancing returns a new
//! context, so a parser that fails can simply be retried with the context it was given.
//!
//! Besides the root cursor there is an indentation-scoped cursor, created with
//! [`Context::indented`]. It presents an indented block as if it were top-level text: every line
//! has the scope's indentation removed and the scope ends at the first line that is not indented
//! enough. Scopes can be nested.
use std::{fmt, ptr};

use crate::LineSource;

/// A 0-based line and column position of a [`Context`].
///
/// This is only used for diagnostics. See [`LineColumn`][crate::text::LineColumn] for the
/// 1-based location used in error messages.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Position {
    /// The current line, starting at `0`.
    pub line: usize,
    /// The current column, starting at `0`.
    pub column: usize,
}

/// Cursor at the top level of a [`LineSource`].
#[derive(Copy, Clone)]
pub struct RootContext<'src> {
    source: &'src LineSource,
    line: usize,
    column: usize,
}

impl PartialEq for RootContext<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.source, other.source) && self.line == other.line && self.column == other.column
    }
}

impl Eq for RootContext<'_> {}

impl fmt::Debug for RootContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootContext")
            .field("line", &self.line)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// Cursor restricted to a block indented by at least `indent_level` spaces.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IndentedContext<'src> {
    parent: Box<Context<'src>>,
    indent_level: usize,
}

impl<'src> IndentedContext<'src> {
    /// The context this scope was created from.
    pub fn parent(&self) -> &Context<'src> {
        &self.parent
    }

    /// The number of leading spaces required and removed by this scope.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }
}

/// An immutable position in a [`LineSource`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Context<'src> {
    /// A position at the top level of the source.
    Root(RootContext<'src>),
    /// A position inside an indentation scope.
    Indented(IndentedContext<'src>),
}

impl<'src> Context<'src> {
    /// Creates a context at the first line of `source`.
    pub fn new(source: &'src LineSource) -> Self {
        Context::Root(RootContext {
            source,
            line: 0,
            column: 0,
        })
    }

    /// Returns the current position.
    ///
    /// Within an indentation scope the column includes the scope's indentation.
    pub fn position(&self) -> Position {
        match self {
            Context::Root(root) => Position {
                line: root.line,
                column: root.column,
            },
            Context::Indented(indented) => {
                let parent = indented.parent.position();
                Position {
                    line: parent.line,
                    column: parent.column + indented.indent_level,
                }
            }
        }
    }

    /// Returns `true` when there is no current line.
    ///
    /// For the root this is the end of the source. Within an indentation scope this is also the
    /// case when the current line is not indented by the scope's indentation level.
    pub fn is_done(&self) -> bool {
        match self {
            Context::Root(root) => root.line >= root.source.len(),
            Context::Indented(indented) => match indented.parent.line() {
                Some(line) => !has_indent(line, indented.indent_level),
                None => true,
            },
        }
    }

    /// Returns the current line, or `None` when [`is_done`][Self::is_done].
    pub fn line(&self) -> Option<&'src str> {
        match self {
            Context::Root(root) => root.source.get(root.line),
            Context::Indented(indented) => {
                let line = indented.parent.line()?;
                has_indent(line, indented.indent_level).then(|| &line[indented.indent_level..])
            }
        }
    }

    /// Returns a context advanced by `lines` lines.
    ///
    /// The column is reset to `0`. Advancing past the end of the source stops at the end.
    #[must_use]
    pub fn advance_line(&self, lines: usize) -> Context<'src> {
        match self {
            Context::Root(root) => Context::Root(RootContext {
                source: root.source,
                line: root.line.saturating_add(lines).min(root.source.len()),
                column: 0,
            }),
            Context::Indented(indented) => Context::Indented(IndentedContext {
                parent: Box::new(indented.parent.advance_line(lines)),
                indent_level: indented.indent_level,
            }),
        }
    }

    /// Returns an iterator over the contexts of the current and all following lines.
    ///
    /// Every call returns a new independent iterator. The iterator ends before the first context
    /// that [`is_done`][Self::is_done], so within an indentation scope it stops at the end of the
    /// indented block.
    pub fn iter_lines(&self) -> Lines<'src> {
        Lines {
            next: Some(self.clone()),
        }
    }

    /// Returns a context for the indented block starting at the current line.
    ///
    /// An `indent_level` of `0` does not restrict anything.
    #[must_use]
    pub fn indented(&self, indent_level: usize) -> Context<'src> {
        Context::Indented(IndentedContext {
            parent: Box::new(self.clone()),
            indent_level,
        })
    }

    /// Leaves the innermost indentation scope.
    ///
    /// The returned context is at the same line. A root context is returned unchanged.
    #[must_use]
    pub fn unindented(self) -> Context<'src> {
        match self {
            Context::Indented(indented) => *indented.parent,
            root => root,
        }
    }
}

fn has_indent(line: &str, indent_level: usize) -> bool {
    line.len() >= indent_level && line.as_bytes()[..indent_level].iter().all(|&b| b == b' ')
}

/// Iterator returned by [`Context::iter_lines`].
#[derive(Clone, Debug)]
pub struct Lines<'src> {
    next: Option<Context<'src>>,
}

impl<'src> Iterator for Lines<'src> {
    type Item = Context<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current.is_done() {
            return None;
        }
        self.next = Some(current.advance_line(1));
        Some(current)
    }
}
