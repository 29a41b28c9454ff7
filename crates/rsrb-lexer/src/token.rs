/// Expression tokens
///
/// The evaluator works on the token stream rather than on raw text so that
/// substituted values never leak into string literals. Whitespace is kept as
/// a token because an unmatched expression falls back to its own text.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// `"..."`, contents without the quotes
    Str(String),
    /// A word made only of ASCII digits
    Int(String),
    /// Any other `[A-Za-z0-9_]+` word
    Word(String),
    Plus,
    Space(String),
    /// Any other single character
    Other(char),
}

impl Token {
    pub fn is_space(&self) -> bool {
        matches!(self, Token::Space(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LexError {
    #[error("unterminated string literal starting at column {column}")]
    UnterminatedString { column: usize },
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize a single expression.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c == '"' {
            let mut contents = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                contents.push(c);
            }
            if !closed {
                return Err(LexError::UnterminatedString { column: start + 1 });
            }
            tokens.push(Token::Str(contents));
        } else if is_word_char(c) {
            let mut word = String::from(c);
            while let Some(&(_, c)) = chars.peek() {
                if !is_word_char(c) {
                    break;
                }
                word.push(c);
                chars.next();
            }
            if word.chars().all(|c| c.is_ascii_digit()) {
                tokens.push(Token::Int(word));
            } else {
                tokens.push(Token::Word(word));
            }
        } else if c.is_whitespace() {
            let mut space = String::from(c);
            while let Some(&(_, c)) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                space.push(c);
                chars.next();
            }
            tokens.push(Token::Space(space));
        } else if c == '+' {
            tokens.push(Token::Plus);
        } else {
            tokens.push(Token::Other(c));
        }
    }

    Ok(tokens)
}
