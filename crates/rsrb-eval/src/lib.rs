//! rsrb interpreter.
//!
//! Runs a parsed program statement by statement. Semantic problems
//! (undefined functions, expressions that cannot be evaluated) never stop a
//! run; they are reported as [`Diagnostic`]s and logged through `tracing`.

mod environment;
mod error;
mod eval;
mod functions;
mod interpreter;
mod output;
mod value;

pub use environment::Environment;
pub use error::{Diagnostic, DiagnosticKind, EvalError};
pub use eval::evaluate_tokens;
pub use functions::FunctionTable;
pub use interpreter::{Flow, Interpreter, InterpreterOptions, DEFAULT_MAX_CALL_DEPTH};
pub use output::Output;
pub use value::Value;

/// Result type for expression evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;
