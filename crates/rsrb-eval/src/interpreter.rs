//! The rsrb statement and call executor.

use std::rc::Rc;

use rsrb_parser::{CallExpr, Expr, Program, Statement, StatementKind};

use crate::environment::Environment;
use crate::error::{Diagnostic, DiagnosticKind, EvalError};
use crate::eval::evaluate_tokens;
use crate::functions::FunctionTable;
use crate::output::Output;
use crate::value::Value;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Tunables for an [`Interpreter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Active call frames allowed before a call is refused.
    pub max_call_depth: usize,
}

impl InterpreterOptions {
    pub fn new() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// What a statement run tells its caller.
///
/// `Return` travels up through nested `if` blocks and stops at the call
/// that owns the function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    Return(Value),
}

/// The rsrb interpreter.
///
/// Holds the state of one program run: the top-level environment, the
/// function table, the output sink and the diagnostics raised so far.
pub struct Interpreter {
    globals: Environment,
    functions: FunctionTable,
    output: Output,
    options: InterpreterOptions,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
}

impl Interpreter {
    /// Create an interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Output::stdout())
    }

    pub fn with_output(output: Output) -> Self {
        Self {
            globals: Environment::new(),
            functions: FunctionTable::new(),
            output,
            options: InterpreterOptions::new(),
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    pub fn options(mut self, options: InterpreterOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse and run rsrb source.
    pub fn eval(&mut self, code: &str) {
        let program = rsrb_parser::parse(code);
        self.run(&program);
    }

    /// Run a parsed program against the top-level environment.
    pub fn run(&mut self, program: &Program) {
        let mut globals = std::mem::take(&mut self.globals);
        for statement in &program.statements {
            // A top-level return was already reported; the run goes on
            self.exec_statement(statement, &mut globals);
        }
        self.globals = globals;
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the interpreter, keeping what the run produced.
    pub fn into_parts(self) -> (Output, Vec<Diagnostic>) {
        (self.output, self.diagnostics)
    }

    fn exec_block(&mut self, statements: &[Statement], env: &mut Environment) -> Flow {
        for statement in statements {
            if let Flow::Return(value) = self.exec_statement(statement, env) {
                return Flow::Return(value);
            }
        }
        Flow::Continue
    }

    fn exec_statement(&mut self, statement: &Statement, env: &mut Environment) -> Flow {
        let line = statement.line;
        match &statement.kind {
            StatementKind::Let { name, value } => {
                let value = self.eval_expr(value, env, line);
                env.define(name.clone(), value);
            }
            StatementKind::Function { decl } => {
                tracing::debug!(function = %decl.name, params = decl.params.len(), "define");
                self.functions.define(Rc::clone(decl));
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, env, line).is_truthy() {
                    return self.exec_block(&then_branch.statements, env);
                } else if let Some(else_branch) = else_branch {
                    return self.exec_block(&else_branch.statements, env);
                }
            }
            StatementKind::Print { value } => {
                let value = self.eval_expr(value, env, line);
                self.output.println(&value.to_string());
            }
            StatementKind::Return { value } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env, line),
                    None => Value::Absent,
                };
                if self.depth == 0 {
                    self.report(
                        DiagnosticKind::ReturnOutsideFunction,
                        line,
                        "return outside of a function".to_string(),
                    );
                }
                return Flow::Return(value);
            }
            StatementKind::Call { call } => {
                self.call(call, env, line);
            }
            StatementKind::Expr { value } => {
                self.eval_expr(value, env, line);
            }
        }
        Flow::Continue
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment, line: usize) -> Value {
        let result = match expr {
            Expr::Call(call) => return self.call(call, env, line),
            Expr::Tokens { tokens, .. } => evaluate_tokens(tokens, env),
            Expr::Malformed { error, .. } => Err(EvalError::from(error.clone())),
        };
        result.unwrap_or_else(|e| {
            self.report(DiagnosticKind::Evaluation, line, format!("eval error: {}", e));
            Value::Absent
        })
    }

    /// Run a function body in a copy of the caller's environment.
    fn call(&mut self, call: &CallExpr, env: &Environment, line: usize) -> Value {
        let Some(decl) = self.functions.get(&call.name) else {
            self.report(
                DiagnosticKind::UndefinedFunction,
                line,
                format!("undefined function: {}", call.name),
            );
            return Value::Absent;
        };

        let args: Vec<Value> = call
            .args
            .iter()
            .map(|arg| self.eval_expr(arg, env, line))
            .collect();

        if self.depth >= self.options.max_call_depth {
            let error = EvalError::CallDepth {
                limit: self.options.max_call_depth,
                name: decl.name.clone(),
            };
            self.report(DiagnosticKind::Evaluation, line, format!("eval error: {}", error));
            return Value::Absent;
        }

        // Extra arguments are dropped, missing ones leave the parameter unbound
        let mut frame = env.clone();
        for (param, value) in decl.params.iter().zip(args) {
            frame.define(param.clone(), value);
        }

        tracing::debug!(function = %decl.name, depth = self.depth, "call");
        self.depth += 1;
        let flow = self.exec_block(&decl.body.statements, &mut frame);
        self.depth -= 1;

        match flow {
            Flow::Return(value) => value,
            Flow::Continue => Value::Absent,
        }
    }

    fn report(&mut self, kind: DiagnosticKind, line: usize, message: String) {
        let diagnostic = Diagnostic {
            kind,
            line,
            message,
        };
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
