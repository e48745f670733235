//! One-way export of a grammar to the Hunspell affix format.
//!
//! Each suffix set gets one single-character flag, allocated sequentially
//! from `A-Z a-z 0-9`; running out of flags is an explicit error. Every
//! suffix becomes an `SFX` line carrying a stripping count, an appending
//! text, and a condition pattern derived from the same condition model the
//! analyzer evaluates. Rule alternatives that reference suffix sets are
//! rendered as best-effort `COMPOUNDRULE` lines.

use std::collections::HashMap;

use crate::alphabet;
use crate::errors::{ErrorKind, MorfixError};
use crate::grammar::{Condition, ConditionTest, Grammar, Operand, Rewrite, RuleElement, SuffixSet};

/// Size of the single-character flag space.
pub const FLAG_LIMIT: usize = 62;

/// Render the whole grammar as affix-file text.
pub fn export(grammar: &Grammar) -> Result<String, MorfixError> {
    Exporter::new(grammar).run()
}

struct Exporter<'a> {
    grammar: &'a Grammar,
    flags: HashMap<String, char>,
    next_flag: usize,
}

impl<'a> Exporter<'a> {
    fn new(grammar: &'a Grammar) -> Self {
        Self {
            grammar,
            flags: HashMap::new(),
            next_flag: 0,
        }
    }

    fn run(mut self) -> Result<String, MorfixError> {
        let mut out = String::new();
        out.push_str("SET UTF-8\nLANG uz\n\n");

        for set in self.grammar.suffix_sets.values() {
            self.suffix_block(&mut out, set)?;
        }
        self.compound_rules(&mut out)?;

        Ok(out)
    }

    fn flag_for(&mut self, name: &str) -> Result<char, MorfixError> {
        if let Some(&flag) = self.flags.get(name) {
            return Ok(flag);
        }
        let flag = ('A'..='Z')
            .chain('a'..='z')
            .chain('0'..='9')
            .nth(self.next_flag)
            .ok_or_else(|| MorfixError::bare(ErrorKind::FlagSpaceExhausted { limit: FLAG_LIMIT }))?;
        self.next_flag += 1;
        self.flags.insert(name.to_string(), flag);
        Ok(flag)
    }

    fn suffix_block(&mut self, out: &mut String, set: &SuffixSet) -> Result<(), MorfixError> {
        let flag = self.flag_for(&set.name)?;

        let mut entries = Vec::new();
        for def in set.suffixes.values() {
            let mut stripping = "0".to_string();
            let mut appending = def.suffix.clone();
            let mut pattern = ".".to_string();

            if !def.condition.is_none() {
                pattern = condition_pattern(&def.condition);
                match &def.condition.rewrite {
                    Rewrite::Cut(count) if *count > 0 => {
                        stripping = count.to_string();
                    }
                    Rewrite::Replace(text)
                        if !text.is_empty()
                            && matches!(def.condition.test, ConditionTest::EndsWith(_)) =>
                    {
                        stripping = "1".to_string();
                        appending = format!("{text}{}", def.suffix);
                    }
                    _ => {}
                }
            }

            entries.push(format!(
                "{stripping} {appending} {pattern} # {}:{}",
                set.description, def.description
            ));
        }

        if !entries.is_empty() {
            out.push_str(&format!("SFX {flag} Y {}\n", entries.len()));
            for entry in entries {
                out.push_str(&format!("SFX {flag} {entry}\n"));
            }
            out.push('\n');
        }
        Ok(())
    }

    fn compound_rules(&mut self, out: &mut String) -> Result<(), MorfixError> {
        for rule in self.grammar.all_rules() {
            let mut lines = Vec::new();

            for alternative in &rule.alternatives {
                let mut flags = String::new();
                for element in alternative {
                    match element {
                        RuleElement::SuffixSetRef(name) => {
                            flags.push(self.flag_for(name)?);
                        }
                        RuleElement::Optional(child) => {
                            if let RuleElement::SuffixSetRef(name) = child.as_ref() {
                                let flag = self.flag_for(name)?;
                                flags.push('(');
                                flags.push(flag);
                                flags.push(')');
                            }
                        }
                        _ => {}
                    }
                }
                if !flags.is_empty() {
                    lines.push(format!("COMPOUNDRULE {flags}"));
                }
            }

            if !lines.is_empty() {
                out.push_str(&format!("# Rule: {} - {}\n", rule.name, rule.description));
                for line in lines {
                    out.push_str(&line);
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        Ok(())
    }
}

fn condition_pattern(condition: &Condition) -> String {
    match &condition.test {
        ConditionTest::EndsWith(Operand::Chars(chars))
        | ConditionTest::StartsWith(Operand::Chars(chars)) => {
            format!("[{}]", chars.iter().collect::<String>())
        }
        ConditionTest::EndsWith(Operand::Pattern(pattern))
        | ConditionTest::StartsWith(Operand::Pattern(pattern)) => pattern.clone(),
        ConditionTest::IsVowel => alphabet::vowel_class(),
        ConditionTest::IsConsonant => alphabet::consonant_class(),
        ConditionTest::None => ".".to_string(),
    }
}
