//! Handles all user-facing output for the CLI.
//!
//! Centralizes pretty-printing of analyses, generated forms, and the loaded
//! grammar so every command reports consistently. Matched analyses get a
//! green check, unmatched ones a red cross.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::analysis::WordAnalysis;
use crate::grammar::Grammar;

fn analysis_parts(analysis: &WordAnalysis) -> String {
    let mut parts = vec![format!("\"{}\"", analysis.root)];
    parts.extend(analysis.suffixes.iter().map(|s| s.detail.clone()));
    parts.join(" + ")
}

/// Print rule-annotated analyses, matched before unmatched.
pub fn print_rule_analyses(word: &str, analyses: &[WordAnalysis]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let matched = analyses.iter().filter(|a| a.rule.is_some()).count();

    writeln!(stdout, "===== analysis of '{word}' =====")?;
    writeln!(
        stdout,
        "{matched} matching, {} unmatched",
        analyses.len() - matched
    )?;
    writeln!(stdout)?;

    for analysis in analyses {
        match &analysis.rule {
            Some(rule) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(stdout, "✓ ")?;
                stdout.reset()?;
                writeln!(stdout, "{}", analysis_parts(analysis))?;
                writeln!(
                    stdout,
                    "    rule: {}{} (id {}, alternative {})",
                    rule.name,
                    if rule.description.is_empty() {
                        String::new()
                    } else {
                        format!(" - {}", rule.description)
                    },
                    rule.id,
                    rule.alternative + 1
                )?;
            }
            None => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                write!(stdout, "✗ ")?;
                stdout.reset()?;
                writeln!(stdout, "{}", analysis_parts(analysis))?;
            }
        }
    }
    Ok(())
}

/// Print every raw segmentation of a word, one variant per block.
pub fn print_decompositions(word: &str, analyses: &[WordAnalysis]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    writeln!(stdout, "===== segmentations of '{word}' =====")?;
    writeln!(stdout, "{} variants found", analyses.len())?;
    writeln!(stdout)?;

    for (index, analysis) in analyses.iter().enumerate() {
        writeln!(stdout, "variant {}: {}", index + 1, analysis_parts(analysis))?;
        for suffix in &analysis.suffixes {
            writeln!(
                stdout,
                "    +{} ({}: {})",
                suffix.suffix, suffix.category, suffix.description
            )?;
        }
    }
    Ok(())
}

/// Print generated surface forms, one per line.
pub fn print_forms(rule: &str, root: &str, forms: &[String]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    writeln!(stdout, "===== forms of '{root}' under rule '{rule}' =====")?;
    for form in forms {
        writeln!(stdout, "{form}")?;
    }
    writeln!(stdout, "{} forms generated", forms.len())?;
    Ok(())
}

/// Print the loaded grammar: suffix sets first, then rule groups.
pub fn print_grammar(grammar: &Grammar) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    writeln!(stdout, "===== suffix sets =====")?;
    for set in grammar.suffix_sets.values() {
        write!(stdout, "SUFFIX {}", set.name)?;
        if !set.description.is_empty() {
            write!(stdout, ": \"{}\"", set.description)?;
        }
        writeln!(stdout)?;
        for def in set.suffixes.values() {
            write!(stdout, "  {}: \"{}\"", def.suffix, def.description)?;
            if !def.condition.is_none() {
                write!(stdout, " WHEN {}", def.condition.test)?;
            }
            writeln!(stdout)?;
        }
        writeln!(stdout)?;
    }

    writeln!(stdout, "===== rules =====")?;
    for rules in grammar.rules.values() {
        for rule in rules {
            write!(stdout, "RULE {}", rule.name)?;
            if !rule.description.is_empty() {
                write!(stdout, ": \"{}\"", rule.description)?;
            }
            writeln!(stdout, " (id {})", rule.id)?;
            for (index, alternative) in rule.alternatives.iter().enumerate() {
                let rendered = alternative
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" + ");
                writeln!(stdout, "  {}: {}", index + 1, rendered)?;
            }
        }
        writeln!(stdout)?;
    }
    Ok(())
}
