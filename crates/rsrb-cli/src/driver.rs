/// Run driver
///
/// Reads a source file, parses it once, and either dumps the AST or hands the
/// program to an interpreter.

use std::fs;
use std::path::{Path, PathBuf};

use rsrb_eval::{Diagnostic, Interpreter, InterpreterOptions, Output, DEFAULT_MAX_CALL_DEPTH};

use crate::error::{Result, RunError};

/// Options for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    input: PathBuf,
    max_call_depth: usize,
    dump_ast: bool,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            dump_ast: false,
        }
    }

    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Serialize the parsed program instead of running it
    pub fn dump_ast(mut self, dump_ast: bool) -> Self {
        self.dump_ast = dump_ast;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

/// What a run produced
#[derive(Debug)]
pub enum RunOutcome {
    /// The program ran to the end of its source
    Ran {
        output: Output,
        diagnostics: Vec<Diagnostic>,
    },
    /// Pretty-printed JSON of the parsed program
    Ast(String),
}

pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Run with `print!` going to stdout.
    pub fn run(&self) -> Result<RunOutcome> {
        self.run_with_output(Output::stdout())
    }

    pub fn run_with_output(&self, output: Output) -> Result<RunOutcome> {
        let path = &self.options.input;
        let source = fs::read_to_string(path).map_err(|source| RunError::Read {
            path: path.clone(),
            source,
        })?;

        let program = rsrb_parser::parse(&source);
        tracing::debug!(
            path = %path.display(),
            statements = program.statements.len(),
            "parsed"
        );

        if self.options.dump_ast {
            return Ok(RunOutcome::Ast(serde_json::to_string_pretty(&program)?));
        }

        let options = InterpreterOptions::new().max_call_depth(self.options.max_call_depth);
        let mut interp = Interpreter::with_output(output).options(options);
        interp.run(&program);

        let (output, diagnostics) = interp.into_parts();
        tracing::info!(diagnostics = diagnostics.len(), "run finished");
        Ok(RunOutcome::Ran {
            output,
            diagnostics,
        })
    }
}
