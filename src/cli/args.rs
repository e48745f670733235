//! Defines the command-line arguments and subcommands for the Morfix CLI.
//!
//! Uses the `clap` crate with its "derive" feature for a declarative,
//! type-safe argument structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "morfix",
    version,
    about = "A grammar-driven morphological analyzer and word-form generator."
)]
pub struct MorfixArgs {
    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Segment a word and rank its analyses against the grammar's rules.
    Analyze {
        /// The path to the grammar file to load.
        #[arg(required = true)]
        grammar: PathBuf,
        /// The word to analyze.
        #[arg(required = true)]
        word: String,
        /// Show every raw segmentation instead of rule-annotated analyses.
        #[arg(long)]
        all: bool,
        /// Emit the analyses as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate every surface form a rule permits for a root.
    Generate {
        /// The path to the grammar file to load.
        #[arg(required = true)]
        grammar: PathBuf,
        /// The rule name to expand.
        #[arg(required = true)]
        rule: String,
        /// The root to attach suffixes to.
        #[arg(required = true)]
        root: String,
        /// Emit the forms as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the loaded grammar: suffix sets, rules, and alternatives.
    Show {
        /// The path to the grammar file to load.
        #[arg(required = true)]
        grammar: PathBuf,
    },
    /// Export the grammar as a Hunspell-style affix file.
    Export {
        /// The path to the grammar file to load.
        #[arg(required = true)]
        grammar: PathBuf,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
