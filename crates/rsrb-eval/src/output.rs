//! Destinations for `print!` output.
//!
//! - `Stdout`: the process's standard output, used by the CLI
//! - `Buffer`: an in-memory capture for tests and embedders

use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    Buffer(String),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout
    }

    pub fn buffer() -> Self {
        Output::Buffer(String::new())
    }

    /// Write `msg` followed by a newline.
    pub fn println(&mut self, msg: &str) {
        match self {
            Output::Stdout => {
                // Write errors (closed pipe) are dropped
                let _ = writeln!(io::stdout().lock(), "{}", msg);
            }
            Output::Buffer(buf) => {
                buf.push_str(msg);
                buf.push('\n');
            }
        }
    }

    /// Captured text; always empty for `Stdout`.
    pub fn captured(&self) -> &str {
        match self {
            Output::Stdout => "",
            Output::Buffer(buf) => buf,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Output::Stdout
    }
}
