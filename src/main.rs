use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use ebnf::{parse, scan, verify, Errors};

mod cli;
mod logger;

use cli::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    match args.command {
        Command::Check { file, start } => check(&file, &start),
        Command::Tokens { file } => tokens(&file),
        Command::Format { file } => print_grammar(&file),
    }
}

fn read(file: &Path) -> Result<Vec<u8>> {
    fs::read(file).with_context(|| format!("failed to read {}", file.display()))
}

/// One line per error, naming the stage and file it came from.
fn failures(stage: &str, file: &Path, errors: &Errors) -> Vec<String> {
    errors
        .iter()
        .map(|err| format!("{}({}) failed: {}", stage, file.display(), err))
        .collect()
}

fn check(file: &Path, start: &str) -> Result<()> {
    let input = read(file)?;

    let (grammar, errors) = parse(&input);
    if let Some(errors) = Errors::from_vec(errors) {
        for line in failures("Parse", file, &errors) {
            println!("{}", line);
        }
        bail!(errors);
    }

    let errors = verify(&grammar, start);
    if let Some(errors) = Errors::from_vec(errors) {
        for line in failures("Verify", file, &errors) {
            println!("{}", line);
        }
        bail!(errors);
    }

    info!(
        "{}: {} productions reachable from {:?}",
        file.display(),
        grammar.len(),
        start
    );
    Ok(())
}

fn tokens(file: &Path) -> Result<()> {
    let input = read(file)?;
    for tok in scan(&input) {
        println!("{}:{}: {}", tok.line, tok.column, tok);
    }
    Ok(())
}

fn print_grammar(file: &Path) -> Result<()> {
    let input = read(file)?;
    let (grammar, errors) = parse(&input);
    if let Some(errors) = Errors::from_vec(errors) {
        for line in failures("Parse", file, &errors) {
            println!("{}", line);
        }
        bail!(errors);
    }
    print!("{}", grammar);
    Ok(())
}
