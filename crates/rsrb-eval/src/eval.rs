//! Operand evaluation.
//!
//! Bound words are replaced by their values, then the result is matched
//! against the fixed binary-`+` patterns. Anything that matches none of them
//! comes back as its own substituted text.

use rsrb_lexer::Token;

use crate::environment::Environment;
use crate::error::EvalError;
use crate::value::Value;
use crate::Result;

/// An operand after substitution.
#[derive(Debug)]
enum Atom {
    Text(String),
    Int(i64),
    Plus,
    /// Unbound words and stray characters
    Raw,
}

/// Evaluate an operand token stream against `env`.
pub fn evaluate_tokens(tokens: &[Token], env: &Environment) -> Result<Value> {
    let mut atoms = Vec::with_capacity(tokens.len());
    let mut rendered = String::new();
    // First literal too large for i64; fatal unless the signed text fits
    let mut oversized: Option<&str> = None;

    for token in tokens {
        match token {
            Token::Word(word) | Token::Int(word) if env.contains(word) => {
                let value = env.get(word).cloned().unwrap_or_default();
                rendered.push_str(&value.substitution());
                match value {
                    Value::Absent => {}
                    Value::Integer(n) => atoms.push(Atom::Int(n)),
                    Value::Text(s) => atoms.push(Atom::Text(s)),
                }
            }
            Token::Int(digits) => {
                match digits.parse() {
                    Ok(n) => atoms.push(Atom::Int(n)),
                    Err(_) => {
                        atoms.push(Atom::Raw);
                        oversized.get_or_insert(digits.as_str());
                    }
                }
                rendered.push_str(digits);
            }
            Token::Word(word) => {
                atoms.push(Atom::Raw);
                rendered.push_str(word);
            }
            Token::Str(s) => {
                atoms.push(Atom::Text(s.clone()));
                rendered.push('"');
                rendered.push_str(s);
                rendered.push('"');
            }
            Token::Plus => {
                atoms.push(Atom::Plus);
                rendered.push('+');
            }
            Token::Space(space) => rendered.push_str(space),
            Token::Other(c) => {
                atoms.push(Atom::Raw);
                rendered.push(*c);
            }
        }
    }

    let value = match atoms.as_slice() {
        [] => Value::Absent,
        [Atom::Text(a), Atom::Plus, Atom::Text(b)] => Value::Text(format!("{}{}", a, b)),
        [Atom::Text(a), Atom::Plus, Atom::Int(n)] => Value::Text(format!("{}{}", a, n)),
        [Atom::Int(n), Atom::Plus, Atom::Text(a)] => Value::Text(format!("{}{}", n, a)),
        [Atom::Int(n), Atom::Plus, Atom::Int(m)] => Value::Integer(
            n.checked_add(*m)
                .ok_or(EvalError::Overflow(*n, *m))?,
        ),
        [Atom::Text(a)] => Value::Text(a.clone()),
        [Atom::Int(n)] => Value::Integer(*n),
        _ => {
            let raw = rendered.trim();
            match (raw.parse::<i64>(), oversized) {
                (Ok(n), _) => Value::Integer(n),
                (Err(_), Some(digits)) => {
                    return Err(EvalError::IntegerOutOfRange(digits.to_string()))
                }
                (Err(_), None) => Value::text(raw),
            }
        }
    };

    Ok(value)
}
