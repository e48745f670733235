//! Morfix: a grammar-driven morphological analyzer and word-form generator
//! for agglutinative languages.
//!
//! A grammar file declares named suffix sets (with attachment conditions and
//! stem rewrites) and word-formation rules over them. Once compiled, the
//! grammar drives three operations: exhaustive segmentation of a word into
//! root + suffix chain, validation of segmentations against the rules, and
//! generation of every surface form a rule permits for a root. The grammar
//! can also be exported as a Hunspell-style affix file.

pub mod alphabet;
pub mod analysis;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod grammar;
pub mod hunspell;
pub mod syntax;

pub use crate::analysis::{MatchedRule, SuffixAnalysis, WordAnalysis};
pub use crate::engine::Engine;
pub use crate::errors::{ErrorCategory, ErrorKind, MorfixError, SourceContext};
pub use crate::grammar::Grammar;
