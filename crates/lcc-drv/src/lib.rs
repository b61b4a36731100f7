//! lcc-drv - Compiler Driver
//!
//! Orchestrates the pipeline for one input file:
//!
//! ```text
//! source ──▶ lex ──▶ parse ──▶ { quaternion gen, LLVM IR gen }
//! ```
//!
//! Flags choose which artifacts are emitted; generation itself always runs.
//! A failing stage prints a single `Fatal error:` line and marks the run
//! failed, but artifacts produced before the failure are still written, so
//! a partial compilation remains inspectable. The process exits non-zero
//! when any stage failed.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use inkwell::context::Context;

use lcc_gen::LlvmGenerator;
use lcc_lex::{jsonify_tokens, Lexer, SourceReader};
use lcc_quad::QuadGenerator;
use lcc_util::fatal_error;

/// Command-line interface of the `lcc` binary.
#[derive(Debug, Parser)]
#[command(name = "lcc", version, about = "Compiler front end for a small C subset")]
pub struct Cli {
    /// Input source file.
    pub input: PathBuf,

    /// Write the token stream as JSON to this path.
    #[arg(long, value_name = "PATH")]
    pub dump_tokens: Option<PathBuf>,

    /// Write the AST as JSON to this path.
    #[arg(long, value_name = "PATH")]
    pub dump_ast: Option<PathBuf>,

    /// Print three-address code to stdout.
    #[arg(long)]
    pub emit_quaternions: bool,

    /// Write the low-level IR to this path.
    #[arg(long, value_name = "PATH")]
    pub emit_ir: Option<PathBuf>,
}

/// Runs the pipeline. Returns true when compilation succeeded.
pub fn run(cli: &Cli) -> bool {
    match compile(cli) {
        Ok(succeeded) => succeeded,
        Err(err) => {
            fatal_error(&format!("{:#}", err));
            false
        }
    }
}

fn compile(cli: &Cli) -> anyhow::Result<bool> {
    let reader = SourceReader::from_path(&cli.input)?;
    let tokens = Lexer::new(reader).run();

    if let Some(path) = &cli.dump_tokens {
        write_json(&jsonify_tokens(&tokens), path)?;
    }

    let mut unit = match lcc_par::parse(tokens) {
        Ok(unit) => unit,
        Err(err) => {
            fatal_error(&err.to_string());
            return Ok(false);
        }
    };

    if let Some(path) = &cli.dump_ast {
        let value = serde_json::to_value(&unit).context("cannot serialize AST")?;
        write_json(&value, path)?;
    }

    let mut succeeded = true;

    // Three-address code. On failure the partially emitted listing is still
    // printed when requested.
    let mut quad = QuadGenerator::new();
    if let Err(err) = quad.generate(&mut unit) {
        fatal_error(&err.to_string());
        succeeded = false;
    }
    if cli.emit_quaternions {
        quad.print().context("cannot print three-address code")?;
    }

    // Low-level IR; same partial-artifact rule.
    let context = Context::create();
    let mut llvm = LlvmGenerator::new(&context);
    if let Err(err) = llvm.generate(&mut unit) {
        fatal_error(&err.to_string());
        succeeded = false;
    }
    if let Some(path) = &cli.emit_ir {
        llvm.dump(path)?;
    }

    Ok(succeeded)
}

fn write_json(value: &serde_json::Value, path: &Path) -> anyhow::Result<()> {
    let mut text = serde_json::to_string_pretty(value).context("cannot format JSON")?;
    text.push('\n');
    std::fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?;

    Ok(())
}
