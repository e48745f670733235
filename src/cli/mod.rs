//! The Morfix command-line interface.
//!
//! Entry point for all CLI commands; orchestrates the core library
//! functions and renders failures through miette.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use miette::Report;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, MorfixArgs};
use crate::engine::Engine;
use crate::errors::{ErrorKind, MorfixError};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = MorfixArgs::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Analyze {
            grammar,
            word,
            all,
            json,
        } => handle_analyze(&grammar, &word, all, json),
        Command::Generate {
            grammar,
            rule,
            root,
            json,
        } => handle_generate(&grammar, &rule, &root, json),
        Command::Show { grammar } => handle_show(&grammar),
        Command::Export { grammar, output } => handle_export(&grammar, output),
    };

    if let Err(e) = result {
        eprintln!("{:?}", Report::new(e));
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_analyze(grammar: &Path, word: &str, all: bool, json: bool) -> Result<(), MorfixError> {
    let engine = Engine::from_file(grammar)?;

    if all {
        let analyses = engine.decompositions(word)?;
        if json {
            print_json(&analyses)
        } else {
            output::print_decompositions(word, &analyses).map_err(stdout_error)
        }
    } else {
        let analyses = engine.analyze_by_rules(word)?;
        if json {
            print_json(&analyses)
        } else {
            output::print_rule_analyses(word, &analyses).map_err(stdout_error)
        }
    }
}

fn handle_generate(grammar: &Path, rule: &str, root: &str, json: bool) -> Result<(), MorfixError> {
    let engine = Engine::from_file(grammar)?;
    let forms = engine.generate_forms(rule, root)?;

    if json {
        print_json(&forms)
    } else {
        output::print_forms(rule, root, &forms).map_err(stdout_error)
    }
}

fn handle_show(grammar: &Path) -> Result<(), MorfixError> {
    let engine = Engine::from_file(grammar)?;
    output::print_grammar(engine.grammar()).map_err(stdout_error)
}

fn handle_export(grammar: &Path, destination: Option<PathBuf>) -> Result<(), MorfixError> {
    let engine = Engine::from_file(grammar)?;
    let affix = engine.export_affix()?;

    match destination {
        Some(path) => fs::write(&path, affix).map_err(|e| {
            MorfixError::bare(ErrorKind::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }),
        None => {
            print!("{affix}");
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), MorfixError> {
    // Serialization of plain data cannot fail here.
    let rendered = serde_json::to_string_pretty(value).expect("analysis types serialize cleanly");
    println!("{rendered}");
    Ok(())
}

fn stdout_error(e: std::io::Error) -> MorfixError {
    MorfixError::bare(ErrorKind::Io {
        path: "<stdout>".to_string(),
        message: e.to_string(),
    })
}
