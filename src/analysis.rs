//! Analysis result types shared by the decomposer, matcher, and generator.

use serde::{Deserialize, Serialize};

pub mod conditions;
pub mod decompose;
pub mod generate;
pub mod matcher;

pub use decompose::{Decompositions, MIN_ROOT_LEN};

/// Count of characters (scalar values), not bytes. All length constraints
/// in the analyzer are character-based.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// One recognized suffix within a segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixAnalysis {
    pub suffix: String,
    pub description: String,
    /// Name of the suffix set the match came from.
    pub category: String,
    /// `suffix:set description:suffix description`, for reporting.
    pub detail: String,
}

/// The rule (and which of its alternatives) a segmentation satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRule {
    pub name: String,
    pub description: String,
    pub id: u32,
    /// 0-based index into the rule's alternatives.
    pub alternative: usize,
}

/// One candidate segmentation of a word, optionally annotated with the rule
/// it matched.
///
/// Suffixes are ordered root-adjacent first, outermost last. When no
/// mid-chain rewrite fired, `root` plus the suffix texts in order
/// reconstructs `original_word`; `original_word` itself is always the
/// concatenation recorded when the candidate was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnalysis {
    pub root: String,
    pub suffixes: Vec<SuffixAnalysis>,
    pub original_word: String,
    pub rule: Option<MatchedRule>,
}

impl WordAnalysis {
    /// The degenerate analysis: the whole word as root, no suffixes.
    pub fn identity(word: &str) -> Self {
        Self {
            root: word.to_string(),
            suffixes: Vec::new(),
            original_word: word.to_string(),
            rule: None,
        }
    }

    pub fn with_rule(&self, rule: MatchedRule) -> Self {
        Self {
            rule: Some(rule),
            ..self.clone()
        }
    }
}
