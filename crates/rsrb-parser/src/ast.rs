/// Abstract Syntax Tree types for rsrb
///
/// Every block is parsed exactly once. Function bodies are shared behind an
/// `Rc` so registering a definition never copies its statements.

use std::rc::Rc;

use rsrb_lexer::{LexError, Token};
use serde::Serialize;

/// A complete rsrb program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Statements between a `{` and its matching `}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// False when the source ended before the closing brace
    pub terminated: bool,
    /// True when the block sat beyond the nesting limit and its lines were
    /// skipped unparsed
    pub truncated: bool,
}

/// A statement with the physical line it started on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub line: usize,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum StatementKind {
    /// `let name = value`
    Let { name: String, value: Expr },
    /// `fn name(params) { body }`
    Function { decl: Rc<FunctionDecl> },
    /// `if condition { .. } else { .. }`
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    /// `print!(value)`
    Print { value: Expr },
    /// `return value`, or a bare `return`
    Return { value: Option<Expr> },
    /// `name(args)` on its own line
    Call { call: CallExpr },
    /// Anything else; evaluated and discarded
    Expr { value: Expr },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    /// `name(args)` as a whole expression
    Call(CallExpr),
    /// Operand text, substituted and matched at evaluation time
    Tokens { source: String, tokens: Vec<Token> },
    /// Text that could not be tokenized; reported when evaluated
    Malformed { source: String, error: LexError },
}
