//! The compiled grammar model.
//!
//! Passive data only: the parser builds these structures once per loaded
//! file and nothing mutates them afterwards, so a `Grammar` can be shared
//! freely across analysis calls (and threads, behind an `Arc`).
//!
//! Maps are `BTreeMap`s so iteration order, and with it candidate discovery
//! order, is identical across loads of the same grammar text.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The guard operand of `ENDSWITH`/`STARTSWITH`: either a literal character
/// set or a regex pattern anchored at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Chars(Vec<char>),
    Pattern(String),
}

/// What a condition tests against the candidate stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConditionTest {
    #[default]
    None,
    EndsWith(Operand),
    StartsWith(Operand),
    IsVowel,
    IsConsonant,
}

/// How the stem is rewritten once the condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Rewrite {
    #[default]
    Keep,
    /// Drop this many trailing characters.
    Cut(usize),
    /// Anchored regex substitution with this text. Only effective when the
    /// test operand is a regex pattern.
    Replace(String),
}

/// A guard on the stem plus an optional stem rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Condition {
    pub test: ConditionTest,
    pub rewrite: Rewrite,
}

impl Condition {
    pub fn is_none(&self) -> bool {
        self.test == ConditionTest::None
    }
}

impl fmt::Display for ConditionTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionTest::None => write!(f, "-"),
            ConditionTest::EndsWith(Operand::Chars(chars)) => {
                write!(f, "ENDSWITH [{}]", chars.iter().collect::<String>())
            }
            ConditionTest::EndsWith(Operand::Pattern(p)) => write!(f, "ENDSWITH /{p}/"),
            ConditionTest::StartsWith(Operand::Chars(chars)) => {
                write!(f, "STARTSWITH [{}]", chars.iter().collect::<String>())
            }
            ConditionTest::StartsWith(Operand::Pattern(p)) => write!(f, "STARTSWITH /{p}/"),
            ConditionTest::IsVowel => write!(f, "ISVOWEL"),
            ConditionTest::IsConsonant => write!(f, "ISCONSONANT"),
        }
    }
}

/// One suffix spelling with its gloss and attachment condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixDefinition {
    pub suffix: String,
    pub description: String,
    pub condition: Condition,
}

/// A named set of interchangeable suffix forms sharing a grammatical role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixSet {
    pub name: String,
    pub description: String,
    /// Keyed by suffix text; a duplicate declaration overwrites (last wins).
    pub suffixes: BTreeMap<String, SuffixDefinition>,
}

/// One element of a rule alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleElement {
    /// A bare literal. A comma-separated value fans out into several
    /// options, but only at generation time.
    Literal(String),
    /// `{миз:"desc", сиз:"desc"}`: a constrained literal with glosses.
    LiteralWithDescription(BTreeMap<String, String>),
    /// `[element]`: may be skipped by the matcher and the generator.
    Optional(Box<RuleElement>),
    /// `@name`: a reference to a suffix set by name.
    SuffixSetRef(String),
}

impl fmt::Display for RuleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleElement::Literal(text) => write!(f, "{text}"),
            RuleElement::LiteralWithDescription(map) => {
                let inner = map
                    .iter()
                    .map(|(k, v)| format!("{k}:\"{v}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{inner}}}")
            }
            RuleElement::Optional(child) => write!(f, "[{child}]"),
            RuleElement::SuffixSetRef(name) => write!(f, "@{name}"),
        }
    }
}

/// A word-formation rule: a name, a gloss, and one or more alternatives.
///
/// The id is assigned sequentially in parse order, so identical grammar text
/// always yields identical ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub description: String,
    pub alternatives: Vec<Vec<RuleElement>>,
    pub id: u32,
}

/// The whole compiled grammar. Immutable once built.
///
/// Rule names are grouping keys, not uniqueness constraints: several `RULE`
/// blocks sharing a name accumulate into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Grammar {
    pub suffix_sets: BTreeMap<String, SuffixSet>,
    pub rules: BTreeMap<String, Vec<Rule>>,
}

impl Grammar {
    pub fn suffix_set(&self, name: &str) -> Option<&SuffixSet> {
        self.suffix_sets.get(name)
    }

    pub fn rules_named(&self, name: &str) -> Option<&[Rule]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    /// All rules across all groups, in deterministic order.
    pub fn all_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values().flatten()
    }
}
