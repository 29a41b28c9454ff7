//! Runtime values for the rsrb interpreter.

use std::fmt;

/// A runtime value in the rsrb language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// No value: a failed evaluation, a call without `return`, an undefined
    /// function. Distinct from an empty string.
    #[default]
    Absent,
    /// A signed integer.
    Integer(i64),
    /// A string value.
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Coerce this value to a boolean.
    ///
    /// Zero, the empty string and `Absent` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Integer(n) => *n != 0,
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// The text this value contributes when substituted into an expression:
    /// strings come back quoted, integers as digits, `Absent` as nothing.
    pub fn substitution(&self) -> String {
        match self {
            Value::Absent => String::new(),
            Value::Integer(n) => n.to_string(),
            Value::Text(s) => format!("\"{}\"", s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}
