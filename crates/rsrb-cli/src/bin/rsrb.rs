/// rsrb script runner CLI

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use rsrb_cli::{RunOptions, RunOutcome, Runner};
use rsrb_eval::DEFAULT_MAX_CALL_DEPTH;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rsrb")]
#[command(about = "Run rsrb scripts")]
#[command(version)]
struct Args {
    /// Input rsrb source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Maximum number of nested function calls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Print the AST as JSON and exit
    #[arg(long)]
    dump_ast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let options = RunOptions::new(args.input)
        .max_call_depth(args.max_call_depth)
        .dump_ast(args.dump_ast);

    let outcome = Runner::new(options).run().context("rsrb run failed")?;
    if let RunOutcome::Ast(json) = outcome {
        println!("{}", json);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}
