//! Error and diagnostic types for the rsrb interpreter.
//!
//! Nothing here aborts a run. An [`EvalError`] is downgraded to a
//! [`Diagnostic`] at the statement that hit it and execution moves on.

use std::fmt;

use rsrb_lexer::LexError;
use thiserror::Error;

/// Failures while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("integer literal {0} does not fit in 64 bits")]
    IntegerOutOfRange(String),

    #[error("integer overflow in {0} + {1}")]
    Overflow(i64, i64),

    #[error("call depth limit of {limit} exceeded in {name}")]
    CallDepth { limit: usize, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A call to a name never registered with `fn`.
    UndefinedFunction,
    /// An [`EvalError`] downgraded to a warning.
    Evaluation,
    /// A `return` that reached the top level.
    ReturnOutsideFunction,
}

/// A warning recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
