//! Simple C Compiler Driver
//!
//! Command-line entry point for the backend: reads a type-checked
//! translation unit serialized by the front end, runs storage allocation
//! and code generation, and writes the resulting assembly text.

use clap::Parser;
use log::info;
use scc_backend::generate_assembly;
use scc_common::TranslationUnit;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "scc")]
#[command(about = "Simple C compiler backend: storage allocation and code generation")]
#[command(version = "0.1.0")]
struct Cli {
    /// Type-checked translation unit in JSON form, as produced by the front end
    input: PathBuf,

    /// Output assembly file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(&cli.input)?;
    let mut unit: TranslationUnit = serde_json::from_str(&source)?;

    info!(
        "generating code for {} function(s), {} global symbol(s)",
        unit.functions.len(),
        unit.globals.len()
    );
    let asm = generate_assembly(&mut unit)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &asm)?;
            info!("assembly written to {}", path.display());
        }
        None => print!("{}", asm),
    }
    Ok(())
}
