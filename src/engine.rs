//! The analysis engine: one loaded grammar plus the public API around it.
//!
//! A grammar is compiled exactly once, at load time, and is read-only from
//! then on. Every analysis operation is a pure function of (word, grammar),
//! so an `Engine` can be shared behind its internal `Arc` and queried from
//! multiple threads without coordination.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::analysis::{char_len, generate, matcher, Decompositions, WordAnalysis};
use crate::errors::{ErrorKind, MorfixError, SourceContext};
use crate::grammar::Grammar;
use crate::hunspell;
use crate::syntax::parser::parse_grammar;

pub struct Engine {
    grammar: Arc<Grammar>,
    source: SourceContext,
}

impl Engine {
    /// Load a grammar file. One blocking read; a lex or parse failure
    /// aborts the whole load and no partial grammar is ever returned.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MorfixError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MorfixError::bare(ErrorKind::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Self::from_source(path.display().to_string(), content)
    }

    /// Compile grammar text directly, without touching the filesystem.
    pub fn from_source(
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, MorfixError> {
        let source = SourceContext::from_file(name, content);
        let grammar = parse_grammar(&source)?;
        debug!(
            suffix_sets = grammar.suffix_sets.len(),
            rule_groups = grammar.rules.len(),
            "grammar loaded"
        );
        Ok(Self {
            grammar: Arc::new(grammar),
            source,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Shared handle to the grammar for callers that outlive the engine.
    pub fn shared_grammar(&self) -> Arc<Grammar> {
        Arc::clone(&self.grammar)
    }

    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// All candidate segmentations of the word, ranked: suffix-chain length
    /// descending, then root length ascending.
    pub fn decompositions(&self, word: &str) -> Result<Vec<WordAnalysis>, MorfixError> {
        let mut all: Vec<WordAnalysis> =
            Decompositions::new(&self.grammar, word).collect::<Result<_, _>>()?;
        all.sort_by(|a, b| {
            b.suffixes
                .len()
                .cmp(&a.suffixes.len())
                .then(char_len(&a.root).cmp(&char_len(&b.root)))
        });
        Ok(all)
    }

    /// The best-ranked segmentation, or the identity analysis (whole word
    /// as root) when the word cannot be segmented at all.
    pub fn analyze_best(&self, word: &str) -> Result<WordAnalysis, MorfixError> {
        Ok(self
            .decompositions(word)?
            .into_iter()
            .next()
            .unwrap_or_else(|| WordAnalysis::identity(word)))
    }

    /// Rule-annotated analyses. A segmentation that matches several
    /// (rule, alternative) pairs appears once per match; one that matches
    /// nothing still appears, with empty rule fields. Matched analyses rank
    /// before unmatched ones.
    pub fn analyze_by_rules(&self, word: &str) -> Result<Vec<WordAnalysis>, MorfixError> {
        let mut annotated = Vec::new();

        for analysis in self.decompositions(word)? {
            let matches = matcher::find_matches(&self.grammar, &analysis);
            if matches.is_empty() {
                annotated.push(analysis);
            } else {
                for matched in matches {
                    annotated.push(analysis.with_rule(matched));
                }
            }
        }

        annotated.sort_by(|a, b| {
            b.rule
                .is_some()
                .cmp(&a.rule.is_some())
                .then(b.suffixes.len().cmp(&a.suffixes.len()))
                .then(char_len(&a.root).cmp(&char_len(&b.root)))
        });
        Ok(annotated)
    }

    /// Every deduplicated surface form the named rule permits for `root`.
    pub fn generate_forms(&self, rule_name: &str, root: &str) -> Result<Vec<String>, MorfixError> {
        generate::generate_forms(&self.grammar, rule_name, root)
    }

    /// Render the grammar as a Hunspell-style affix file.
    pub fn export_affix(&self) -> Result<String, MorfixError> {
        hunspell::export(&self.grammar)
    }
}
