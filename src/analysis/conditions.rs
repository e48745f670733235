//! Condition evaluation and stem rewriting.
//!
//! A condition gates whether a suffix may attach to a stem; its rewrite then
//! says how the stem changes once it does. Regex operands are compiled on
//! first evaluation (a malformed pattern is a fatal error at that point, not
//! at load time) and cached for the life of the process.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::alphabet;
use crate::analysis::char_len;
use crate::errors::{ErrorKind, MorfixError};
use crate::grammar::{Condition, ConditionTest, Operand, Rewrite};

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(Mutex::default);

/// Anchor a user pattern at the end of the stem, case-insensitively.
fn end_anchored(pattern: &str) -> String {
    format!("(?i){pattern}$")
}

/// Anchor a user pattern at the start of the stem, case-insensitively.
fn start_anchored(pattern: &str) -> String {
    format!("(?i)^{pattern}")
}

fn compiled(anchored: String, original: &str) -> Result<Regex, MorfixError> {
    let mut cache = PATTERN_CACHE.lock().expect("pattern cache poisoned");
    if let Some(re) = cache.get(&anchored) {
        return Ok(re.clone());
    }
    let re = Regex::new(&anchored).map_err(|e| {
        MorfixError::bare(ErrorKind::InvalidPattern {
            pattern: original.to_string(),
            reason: e.to_string(),
        })
    })?;
    cache.insert(anchored, re.clone());
    Ok(re)
}

/// Does the condition hold against this stem?
///
/// `None` always holds; an empty stem never satisfies any other test.
pub fn holds(condition: &Condition, stem: &str) -> Result<bool, MorfixError> {
    if condition.is_none() {
        return Ok(true);
    }
    if stem.is_empty() {
        return Ok(false);
    }

    match &condition.test {
        ConditionTest::None => Ok(true),
        ConditionTest::EndsWith(Operand::Chars(chars)) => {
            let last = stem.chars().next_back().expect("stem is non-empty");
            Ok(chars.contains(&last))
        }
        ConditionTest::EndsWith(Operand::Pattern(pattern)) => {
            Ok(compiled(end_anchored(pattern), pattern)?.is_match(stem))
        }
        ConditionTest::StartsWith(Operand::Chars(chars)) => {
            let first = stem.chars().next().expect("stem is non-empty");
            Ok(chars.contains(&first))
        }
        ConditionTest::StartsWith(Operand::Pattern(pattern)) => {
            Ok(compiled(start_anchored(pattern), pattern)?.is_match(stem))
        }
        ConditionTest::IsVowel => {
            let last = stem.chars().next_back().expect("stem is non-empty");
            Ok(alphabet::is_vowel(last))
        }
        ConditionTest::IsConsonant => {
            let last = stem.chars().next_back().expect("stem is non-empty");
            Ok(alphabet::is_consonant(last))
        }
    }
}

/// Rewrite the stem after its condition held.
///
/// Replacement text applies as an anchored regex substitution at the end the
/// test looked at, and only when the operand was a regex; a cut drops
/// trailing characters when the stem is long enough; anything else leaves
/// the stem untouched.
pub fn apply(condition: &Condition, stem: &str) -> Result<String, MorfixError> {
    match &condition.rewrite {
        Rewrite::Keep => Ok(stem.to_string()),
        Rewrite::Replace(text) => match &condition.test {
            ConditionTest::EndsWith(Operand::Pattern(pattern)) => {
                let re = compiled(end_anchored(pattern), pattern)?;
                Ok(re.replace(stem, text.as_str()).into_owned())
            }
            ConditionTest::StartsWith(Operand::Pattern(pattern)) => {
                let re = compiled(start_anchored(pattern), pattern)?;
                Ok(re.replace(stem, text.as_str()).into_owned())
            }
            _ => Ok(stem.to_string()),
        },
        Rewrite::Cut(count) => {
            if *count > 0 && char_len(stem) >= *count {
                Ok(cut_trailing(stem, *count).to_string())
            } else {
                Ok(stem.to_string())
            }
        }
    }
}

/// Drop `count` trailing characters. Caller guarantees `count >= 1` and the
/// stem is at least that long.
fn cut_trailing(stem: &str, count: usize) -> &str {
    match stem.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &stem[..idx],
        None => "",
    }
}
