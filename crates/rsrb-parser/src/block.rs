//! Line cursor and block extraction.

use rsrb_lexer::{brace_counts, Line};

/// A forward-only position in a sequence of logical lines.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [Line],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [Line]) -> Self {
        Self { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a Line> {
        self.lines.get(self.pos)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a Line;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }
}

/// The raw lines of one block, before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub lines: &'a [Line],
    pub terminated: bool,
}

impl RawBlock<'_> {
    /// The block as source text, one logical line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Consume lines up to the brace that closes an already opened block.
///
/// The cursor must sit just after the line holding the opening `{`. The
/// closing line is consumed but not included. Running out of lines is not an
/// error: the partial block comes back with `terminated` unset.
///
/// The block borrows its lines from the cursor's slice.
pub fn extract_block<'a>(cursor: &mut LineCursor<'a>) -> RawBlock<'a> {
    let source = cursor.lines;
    let start = cursor.pos;
    let mut end = start;
    let mut depth: isize = 1;

    for line in cursor.by_ref() {
        let (opens, closes) = brace_counts(&line.text);
        depth += opens as isize;
        depth -= closes as isize;
        if depth <= 0 {
            return RawBlock {
                lines: &source[start..end],
                terminated: true,
            };
        }
        end += 1;
    }

    RawBlock {
        lines: &source[start..end],
        terminated: false,
    }
}
