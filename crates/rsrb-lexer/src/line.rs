/// Logical lines of an rsrb source document
///
/// A logical line is what the statement classifier sees: comments are gone,
/// `;` separates statements, an opening brace ends the line that opens it and
/// a closing brace always stands alone. String literals are opaque to all of
/// these rules.

use serde::Serialize;

/// One logical line, tagged with the physical line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// 1-based physical line number
    pub number: usize,
    /// Trimmed, never empty
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Split `source` into logical lines.
pub fn logical_lines(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();

    for (index, physical) in source.lines().enumerate() {
        let number = index + 1;
        let mut current = String::new();
        let mut in_string = false;
        let mut chars = physical.chars().peekable();

        while let Some(c) = chars.next() {
            if in_string {
                current.push(c);
                if c == '"' {
                    in_string = false;
                }
                continue;
            }

            match c {
                '"' => {
                    in_string = true;
                    current.push(c);
                }
                // Comment runs to the end of the physical line
                '/' if chars.peek() == Some(&'/') => break,
                ';' => flush(&mut lines, number, &mut current),
                '{' => {
                    current.push(c);
                    flush(&mut lines, number, &mut current);
                }
                '}' => {
                    flush(&mut lines, number, &mut current);
                    current.push(c);
                    flush(&mut lines, number, &mut current);
                }
                _ => current.push(c),
            }
        }

        flush(&mut lines, number, &mut current);
    }

    lines
}

fn flush(lines: &mut Vec<Line>, number: usize, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        lines.push(Line::new(number, text));
    }
    current.clear();
}

/// Count the `{` and `}` in `text` that sit outside string literals.
pub fn brace_counts(text: &str) -> (usize, usize) {
    let mut opens = 0;
    let mut closes = 0;
    let mut in_string = false;

    for c in text.chars() {
        match c {
            '"' => in_string = !in_string,
            '{' if !in_string => opens += 1,
            '}' if !in_string => closes += 1,
            _ => {}
        }
    }

    (opens, closes)
}
