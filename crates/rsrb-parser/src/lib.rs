pub mod ast;
pub mod block;

pub use ast::*;
pub use block::{extract_block, LineCursor, RawBlock};

use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;
use rsrb_lexer::{logical_lines, tokenize, Line};

// Identifiers are ASCII, matching what the tokenizer reads back as a word.
static LET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^let\s+([A-Za-z0-9_]+)\s*=\s*(.+)$").unwrap());
static FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^fn\s+([A-Za-z0-9_]+)\s*\(([A-Za-z0-9_,\s]*)\)\s*\{$").unwrap()
});
static IF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^if\s+(.+?)\s*\{$").unwrap());
static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^else\b").unwrap());
static PRINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^print!\((.+)\)$").unwrap());
static RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^return(?:\s+(.+))?$").unwrap());

/// Deepest block nesting that is parsed; blocks below it are skipped.
pub const MAX_NESTING: usize = 64;

/// Parse an rsrb program from a string
///
/// Parsing never fails: a line that is not a recognised statement becomes an
/// expression statement, and an unclosed block keeps whatever it collected.
pub fn parse(input: &str) -> Program {
    parse_with_max_nesting(input, MAX_NESTING)
}

/// Parse with a custom block nesting limit.
///
/// A block opened more than `max_nesting` levels deep still consumes its
/// lines up to the matching `}`, but comes back empty with `truncated` set.
pub fn parse_with_max_nesting(input: &str, max_nesting: usize) -> Program {
    let lines = logical_lines(input);
    let parser = Parser { max_nesting };
    Program {
        statements: parser.parse_lines(&lines, 0),
    }
}

struct Parser {
    max_nesting: usize,
}

impl Parser {
    fn parse_lines(&self, lines: &[Line], depth: usize) -> Vec<Statement> {
        let mut cursor = LineCursor::new(lines);
        let mut statements = Vec::new();
        while let Some(line) = cursor.next() {
            statements.push(self.parse_statement(line, &mut cursor, depth));
        }
        statements
    }

    /// Parse the block opened by the current line, which sits at `depth`.
    fn parse_block(&self, cursor: &mut LineCursor<'_>, depth: usize) -> Block {
        let raw = extract_block(cursor);
        if !raw.terminated {
            tracing::trace!(lines = raw.lines.len(), "block ran to end of source");
        }
        if depth >= self.max_nesting {
            tracing::warn!(
                limit = self.max_nesting,
                lines = raw.lines.len(),
                "blocks nested too deeply, skipping"
            );
            return Block {
                statements: Vec::new(),
                terminated: raw.terminated,
                truncated: true,
            };
        }
        Block {
            statements: self.parse_lines(raw.lines, depth + 1),
            terminated: raw.terminated,
            truncated: false,
        }
    }

    /// Classify one logical line, pulling any blocks it opens from `cursor`.
    fn parse_statement(
        &self,
        line: &Line,
        cursor: &mut LineCursor<'_>,
        depth: usize,
    ) -> Statement {
        let text = line.text.as_str();
        tracing::trace!(line = line.number, text, "classify");

        let kind = if let Some(caps) = LET.captures(text) {
            StatementKind::Let {
                name: caps[1].to_string(),
                value: parse_expr(&caps[2]),
            }
        } else if let Some(caps) = FN.captures(text) {
            let params = caps[2]
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            let body = self.parse_block(cursor, depth);
            StatementKind::Function {
                decl: Rc::new(FunctionDecl {
                    name: caps[1].to_string(),
                    params,
                    body,
                }),
            }
        } else if let Some(caps) = IF.captures(text) {
            let condition = parse_expr(&caps[1]);
            let then_branch = self.parse_block(cursor, depth);
            let else_branch = match cursor.peek() {
                Some(next) if ELSE.is_match(&next.text) => {
                    cursor.next();
                    // `else` with its brace on the following line
                    if !next.text.ends_with('{')
                        && cursor.peek().is_some_and(|l| l.text == "{")
                    {
                        cursor.next();
                    }
                    Some(self.parse_block(cursor, depth))
                }
                _ => None,
            };
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            }
        } else if let Some(caps) = PRINT.captures(text) {
            StatementKind::Print {
                value: parse_expr(&caps[1]),
            }
        } else if let Some(caps) = RETURN.captures(text) {
            StatementKind::Return {
                value: caps.get(1).map(|m| parse_expr(m.as_str())),
            }
        } else if let Some(call) = parse_call(text) {
            StatementKind::Call { call }
        } else {
            StatementKind::Expr {
                value: parse_expr(text),
            }
        };

        Statement {
            line: line.number,
            kind,
        }
    }
}

/// Parse an expression: a whole-expression call, or operand tokens.
pub fn parse_expr(text: &str) -> Expr {
    let text = text.trim();
    if let Some(call) = parse_call(text) {
        return Expr::Call(call);
    }
    match tokenize(text) {
        Ok(tokens) => Expr::Tokens {
            source: text.to_string(),
            tokens,
        },
        Err(error) => Expr::Malformed {
            source: text.to_string(),
            error,
        },
    }
}

/// Recognise `name(args)` where the parenthesis after `name` closes at the
/// very end of `text`.
fn parse_call(text: &str) -> Option<CallExpr> {
    let open = text.find('(')?;
    let name = text[..open].trim_end();
    let mut name_chars = name.chars();
    let first = name_chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_')
        || !name_chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }

    let close = matching_paren(text, open)?;
    if close != text.len() - 1 {
        return None;
    }

    Some(CallExpr {
        name: name.to_string(),
        args: split_args(&text[open + 1..close])
            .into_iter()
            .map(parse_expr)
            .collect(),
    })
}

/// Byte index of the `)` matching the `(` at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    for (i, c) in text.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split an argument list on commas outside strings and nested parentheses.
fn split_args(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rsrb_lexer::Token;

    fn kinds(input: &str) -> Vec<StatementKind> {
        parse(input).statements.into_iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_parse_empty() {
        let program = parse("");
        assert_eq!(program.statements.len(), 0, "Expected empty program");
    }

    #[test]
    fn test_parse_let() {
        match &kinds("let x = 2 + 3")[..] {
            [StatementKind::Let { name, value }] => {
                assert_eq!(name, "x");
                match value {
                    Expr::Tokens { source, .. } => assert_eq!(source, "2 + 3"),
                    other => panic!("Expected token expression, got {:?}", other),
                }
            }
            other => panic!("Expected a single let, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function() {
        let input = "fn helper(x, , y) {\n  return x + y\n}";
        match &kinds(input)[..] {
            [StatementKind::Function { decl }] => {
                assert_eq!(decl.name, "helper");
                assert_eq!(decl.params, vec!["x", "y"]);
                assert!(decl.body.terminated);
                assert_eq!(decl.body.statements.len(), 1);
                assert!(matches!(
                    decl.body.statements[0].kind,
                    StatementKind::Return { value: Some(_) }
                ));
            }
            other => panic!("Expected Function, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_function_without_params() {
        match &kinds("fn hello() {}")[..] {
            [StatementKind::Function { decl }] => {
                assert!(decl.params.is_empty());
                assert!(decl.body.statements.is_empty());
            }
            other => panic!("Expected Function, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_else_same_line() {
        let input = r#"if 0 { print!("t"); } else { print!("f"); }"#;
        match &kinds(input)[..] {
            [StatementKind::If {
                then_branch,
                else_branch: Some(else_branch),
                ..
            }] => {
                assert_eq!(then_branch.statements.len(), 1);
                assert_eq!(else_branch.statements.len(), 1);
            }
            other => panic!("Expected If with else, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_else_after_comment_lines() {
        let input = "if x {\n  print!(1)\n}\n// note\n\nelse {\n  print!(2)\n}\nprint!(3)";
        let statements = kinds(input);
        assert_eq!(statements.len(), 2);
        assert!(matches!(
            statements[0],
            StatementKind::If {
                else_branch: Some(_),
                ..
            }
        ));
        assert!(matches!(statements[1], StatementKind::Print { .. }));
    }

    #[test]
    fn test_parse_if_without_else() {
        let statements = kinds("if x {\n  print!(1)\n}\nprint!(2)");
        assert!(matches!(
            statements[0],
            StatementKind::If {
                else_branch: None,
                ..
            }
        ));
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_parse_print_and_return() {
        let statements = kinds("print!(x)\nreturn\nreturn 1");
        assert!(matches!(statements[0], StatementKind::Print { .. }));
        assert!(matches!(statements[1], StatementKind::Return { value: None }));
        assert!(matches!(statements[2], StatementKind::Return { value: Some(_) }));
    }

    #[test]
    fn test_parse_bare_call() {
        match &kinds("greet(\"bob\", add(1, 2))")[..] {
            [StatementKind::Call { call }] => {
                assert_eq!(call.name, "greet");
                assert_eq!(call.args.len(), 2);
                match &call.args[1] {
                    Expr::Call(inner) => {
                        assert_eq!(inner.name, "add");
                        assert_eq!(inner.args.len(), 2);
                    }
                    other => panic!("Expected nested call, got {:?}", other),
                }
            }
            other => panic!("Expected Call, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_of_calls_is_not_a_call() {
        assert!(parse_call("add(1) + add(2)").is_none());
        assert!(matches!(parse_expr("add(1) + add(2)"), Expr::Tokens { .. }));
    }

    #[test]
    fn test_stray_line_is_expression_statement() {
        assert!(matches!(kinds("1 +")[..], [StatementKind::Expr { .. }]));
    }

    #[test]
    fn test_malformed_expression() {
        match parse_expr("\"open") {
            Expr::Malformed { source, .. } => assert_eq!(source, "\"open"),
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_string_argument_with_comma() {
        let call = parse_call(r#"f("a, b", c)"#).unwrap();
        assert_eq!(call.args.len(), 2);
        assert_eq!(
            call.args[0],
            Expr::Tokens {
                source: "\"a, b\"".into(),
                tokens: vec![Token::Str("a, b".into())],
            }
        );
    }

    #[test]
    fn test_unterminated_function_body() {
        let program = parse("print!(1)\nfn broken(a) {\n  print!(a)\n");
        assert_eq!(program.statements.len(), 2);
        match &program.statements[1].kind {
            StatementKind::Function { decl } => {
                assert!(!decl.body.terminated);
                assert_eq!(decl.body.statements.len(), 1);
            }
            other => panic!("Expected Function, got {:?}", other),
        }
    }

    #[test]
    fn test_non_ascii_names_are_not_bindings() {
        assert!(matches!(kinds("let café = 5")[..], [StatementKind::Expr { .. }]));
        assert!(matches!(
            kinds("fn f(é) {\n}")[..],
            [StatementKind::Expr { .. }, StatementKind::Expr { .. }]
        ));
        assert!(matches!(kinds("let cafe_2 = 5")[..], [StatementKind::Let { .. }]));
    }

    /// Depth of the chain of `if` blocks starting at `statements`
    fn if_depth(statements: &[Statement]) -> (usize, bool) {
        let mut depth = 0;
        let mut current = statements;
        loop {
            match current.first().map(|s| &s.kind) {
                Some(StatementKind::If { then_branch, .. }) => {
                    depth += 1;
                    if then_branch.truncated {
                        return (depth, true);
                    }
                    current = &then_branch.statements;
                }
                _ => return (depth, false),
            }
        }
    }

    #[test]
    fn test_deep_unclosed_nesting_is_truncated() {
        let input = "if 1 {\n".repeat(5000) + "print!(1)\n";
        let program = parse(&input);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(if_depth(&program.statements), (MAX_NESTING + 1, true));
    }

    #[test]
    fn test_nesting_limit_consumes_closed_blocks() {
        let input = "if 1 {\n".repeat(10) + &"}\n".repeat(10) + "print!(2)";
        let program = parse_with_max_nesting(&input, 3);
        assert_eq!(program.statements.len(), 2);
        assert_eq!(if_depth(&program.statements), (4, true));
        assert!(matches!(program.statements[1].kind, StatementKind::Print { .. }));
    }

    #[test]
    fn test_nesting_within_limit_is_parsed() {
        let input = "if 1 {\n".repeat(3) + &"}\n".repeat(3);
        assert_eq!(if_depth(&parse(&input).statements), (3, false));
    }

    #[test]
    fn test_statement_lines() {
        let program = parse("let a = 1\n\nprint!(a)");
        let lines: Vec<usize> = program.statements.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }
}
