//! Rule matching: does a segmentation fit a word-formation rule?
//!
//! The matcher is a single left-to-right pass, no backtracking: a cursor
//! walks the suffix chain while the alternative's elements are scanned in
//! order, and the alternative matches only if the cursor lands exactly on
//! the end of the chain.

use crate::analysis::{MatchedRule, SuffixAnalysis, WordAnalysis};
use crate::grammar::{Grammar, RuleElement};

/// Every (rule, alternative) pair this segmentation satisfies, across all
/// rule groups, in deterministic grammar order.
pub fn find_matches(grammar: &Grammar, analysis: &WordAnalysis) -> Vec<MatchedRule> {
    let mut matches = Vec::new();

    for rule in grammar.all_rules() {
        for (index, alternative) in rule.alternatives.iter().enumerate() {
            if alternative_matches(&analysis.suffixes, alternative) {
                matches.push(MatchedRule {
                    name: rule.name.clone(),
                    description: rule.description.clone(),
                    id: rule.id,
                    alternative: index,
                });
            }
        }
    }

    matches
}

/// Match one suffix chain against one alternative.
pub fn alternative_matches(chain: &[SuffixAnalysis], alternative: &[RuleElement]) -> bool {
    let mut cursor = 0usize;

    for element in alternative {
        match element {
            // Plain literals constrain nothing.
            RuleElement::Literal(_) => {}

            RuleElement::LiteralWithDescription(map) => match chain.get(cursor) {
                Some(suffix) if map.contains_key(&suffix.suffix) => cursor += 1,
                _ => return false,
            },

            RuleElement::SuffixSetRef(name) => match chain.get(cursor) {
                Some(suffix) if suffix.category == *name => cursor += 1,
                _ => return false,
            },

            // Optionals never fail; they consume a suffix only when it
            // satisfies the child's constraint.
            RuleElement::Optional(child) => {
                if let Some(suffix) = chain.get(cursor) {
                    let consumes = match child.as_ref() {
                        RuleElement::SuffixSetRef(name) => suffix.category == *name,
                        RuleElement::LiteralWithDescription(map) => {
                            map.contains_key(&suffix.suffix)
                        }
                        // Other child kinds carry no defined check here.
                        _ => false,
                    };
                    if consumes {
                        cursor += 1;
                    }
                }
            }
        }
    }

    cursor == chain.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn suffix(text: &str, category: &str) -> SuffixAnalysis {
        SuffixAnalysis {
            suffix: text.to_string(),
            description: String::new(),
            category: category.to_string(),
            detail: String::new(),
        }
    }

    #[test]
    fn optional_set_ref_matches_zero_or_one_but_not_two() {
        let alternative = vec![RuleElement::Optional(Box::new(RuleElement::SuffixSetRef(
            "case".into(),
        )))];

        assert!(alternative_matches(&[], &alternative));
        assert!(alternative_matches(&[suffix("ni", "case")], &alternative));
        assert!(!alternative_matches(
            &[suffix("ni", "case"), suffix("ga", "case")],
            &alternative
        ));
    }

    #[test]
    fn optional_skips_non_matching_suffix_and_then_fails_on_length() {
        let alternative = vec![RuleElement::Optional(Box::new(RuleElement::SuffixSetRef(
            "case".into(),
        )))];
        // The suffix is present but from another category: the optional
        // skips it, the cursor stays at 0, and the length check fails.
        assert!(!alternative_matches(&[suffix("lar", "plural")], &alternative));
    }

    #[test]
    fn literal_map_requires_key_membership() {
        let mut map = BTreeMap::new();
        map.insert("miz".to_string(), "1pl".to_string());
        let alternative = vec![RuleElement::LiteralWithDescription(map)];

        assert!(alternative_matches(&[suffix("miz", "any")], &alternative));
        assert!(!alternative_matches(&[suffix("siz", "any")], &alternative));
        assert!(!alternative_matches(&[], &alternative));
    }

    #[test]
    fn plain_literal_constrains_nothing() {
        let alternative = vec![
            RuleElement::Literal("ish".into()),
            RuleElement::SuffixSetRef("case".into()),
        ];
        assert!(alternative_matches(&[suffix("ni", "case")], &alternative));
    }

    #[test]
    fn trailing_unconsumed_suffixes_fail() {
        let alternative = vec![RuleElement::SuffixSetRef("case".into())];
        assert!(!alternative_matches(
            &[suffix("ni", "case"), suffix("lar", "plural")],
            &alternative
        ));
    }
}
