//! Command line arguments for `ebnfcheck`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ebnfcheck", version, about = "Parse and verify EBNF grammars.")]
pub struct Args {
    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a grammar and verify it from a start production.
    Check {
        #[arg(required = true)]
        file: PathBuf,

        /// Production every other production must be reachable from.
        #[arg(short, long, default_value = "program")]
        start: String,
    },
    /// Print the tokens scanned from a grammar.
    Tokens {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print a grammar in normalized form.
    Format {
        #[arg(required = true)]
        file: PathBuf,
    },
}
