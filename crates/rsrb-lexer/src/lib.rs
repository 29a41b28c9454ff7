//! Lexical layer for rsrb.
//!
//! Two passes live here: [`logical_lines`] turns source text into the
//! statement-sized lines the parser classifies, and [`tokenize`] splits a
//! single expression into the tokens the evaluator substitutes and matches.

pub mod line;
pub mod token;

pub use line::{brace_counts, logical_lines, Line};
pub use token::{tokenize, LexError, Token};
