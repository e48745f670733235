//! Surface-form generation.
//!
//! Expands a rule's alternatives into concrete word forms by folding each
//! element left to right over a growing candidate set that starts as the
//! bare root. Results across alternatives are deduplicated in generation
//! order.

use std::collections::HashSet;

use crate::analysis::conditions;
use crate::errors::{ErrorKind, MorfixError};
use crate::grammar::{Grammar, RuleElement};

/// All valid surface forms for `root` under the rules registered as
/// `rule_name`. An unknown rule or suffix-set name fails only this call.
pub fn generate_forms(
    grammar: &Grammar,
    rule_name: &str,
    root: &str,
) -> Result<Vec<String>, MorfixError> {
    let rules = grammar.rules_named(rule_name).ok_or_else(|| {
        MorfixError::bare(ErrorKind::RuleNotFound {
            name: rule_name.to_string(),
        })
    })?;

    let mut forms = Vec::new();
    for rule in rules {
        for alternative in &rule.alternatives {
            forms.extend(expand_alternative(grammar, alternative, root)?);
        }
    }

    let mut seen = HashSet::new();
    forms.retain(|form| seen.insert(form.clone()));
    Ok(forms)
}

fn expand_alternative(
    grammar: &Grammar,
    elements: &[RuleElement],
    root: &str,
) -> Result<Vec<String>, MorfixError> {
    let mut candidates = vec![root.to_string()];

    for element in elements {
        let mut next = Vec::new();
        for candidate in &candidates {
            next.extend(apply_element(grammar, element, candidate)?);
        }
        candidates = next;
    }

    Ok(candidates)
}

fn apply_element(
    grammar: &Grammar,
    element: &RuleElement,
    word: &str,
) -> Result<Vec<String>, MorfixError> {
    match element {
        RuleElement::Literal(value) => {
            // A comma-separated literal fans out into one candidate per
            // option.
            if value.contains(',') {
                Ok(value
                    .split(',')
                    .map(|option| format!("{word}{}", option.trim()))
                    .collect())
            } else {
                Ok(vec![format!("{word}{value}")])
            }
        }

        // Keep the unextended candidate and add the extended ones.
        RuleElement::Optional(child) => {
            let mut out = vec![word.to_string()];
            out.extend(apply_element(grammar, child, word)?);
            Ok(out)
        }

        RuleElement::SuffixSetRef(name) => {
            let set = grammar.suffix_set(name).ok_or_else(|| {
                MorfixError::bare(ErrorKind::SuffixSetNotFound {
                    name: name.to_string(),
                })
            })?;

            let mut out = Vec::new();
            for def in set.suffixes.values() {
                if conditions::holds(&def.condition, word)? {
                    let stem = conditions::apply(&def.condition, word)?;
                    out.push(format!("{stem}{}", def.suffix));
                }
            }
            Ok(out)
        }

        // Not supported in generation; candidates pass through unchanged.
        RuleElement::LiteralWithDescription(_) => Ok(vec![word.to_string()]),
    }
}
