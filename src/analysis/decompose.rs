//! Exhaustive backtracking segmentation.
//!
//! `Decompositions` peels every matching suffix off the end of the word and
//! recurses on the rewritten stem, exploring all matches rather than only
//! the longest, so the search is exponential in the number of overlapping
//! suffix matches. It runs as an explicit worklist yielding candidates
//! lazily: callers that only need the first few results never pay for the
//! full expansion, and there is no large intermediate list.

use std::collections::VecDeque;

use crate::analysis::{char_len, conditions, SuffixAnalysis, WordAnalysis};
use crate::errors::MorfixError;
use crate::grammar::Grammar;

/// A root may never be shorter than this many characters.
pub const MIN_ROOT_LEN: usize = 2;

struct Frame {
    /// The not-yet-segmented prefix, after any rewrites.
    remainder: String,
    /// Suffixes stripped so far, root-adjacent first.
    chain: Vec<SuffixAnalysis>,
}

/// Lazy iterator over all candidate segmentations of one word.
pub struct Decompositions<'a> {
    grammar: &'a Grammar,
    stack: Vec<Frame>,
    ready: VecDeque<WordAnalysis>,
    failed: bool,
}

impl<'a> Decompositions<'a> {
    pub fn new(grammar: &'a Grammar, word: &str) -> Self {
        Self {
            grammar,
            stack: vec![Frame {
                remainder: word.to_string(),
                chain: Vec::new(),
            }],
            ready: VecDeque::new(),
            failed: false,
        }
    }

    fn expand(&mut self, frame: Frame) -> Result<(), MorfixError> {
        let len = char_len(&frame.remainder);
        if len < MIN_ROOT_LEN {
            return Ok(());
        }

        // Record this split. The empty-chain case is the initial frame, so
        // the whole word appears exactly once as a zero-suffix candidate.
        self.ready.push_back(WordAnalysis {
            original_word: original_word(&frame.remainder, &frame.chain),
            root: frame.remainder.clone(),
            suffixes: frame.chain.clone(),
            rule: None,
        });

        // At or just above the minimum the remainder cannot split further.
        if len <= MIN_ROOT_LEN + 1 {
            return Ok(());
        }

        let mut matches: Vec<(SuffixAnalysis, String, usize)> = Vec::new();

        for set in self.grammar.suffix_sets.values() {
            for def in set.suffixes.values() {
                let suffix_len = char_len(&def.suffix);
                if suffix_len == 0
                    || len <= suffix_len
                    || !frame.remainder.ends_with(def.suffix.as_str())
                {
                    continue;
                }

                let stem = &frame.remainder[..frame.remainder.len() - def.suffix.len()];
                if !conditions::holds(&def.condition, stem)? {
                    continue;
                }
                let rewritten = conditions::apply(&def.condition, stem)?;
                if char_len(&rewritten) < MIN_ROOT_LEN {
                    continue;
                }

                matches.push((
                    SuffixAnalysis {
                        suffix: def.suffix.clone(),
                        description: def.description.clone(),
                        category: set.name.clone(),
                        detail: format!("{}:{}:{}", def.suffix, set.description, def.description),
                    },
                    rewritten,
                    suffix_len,
                ));
            }
        }

        // Longest suffix first; stable, so set order breaks ties.
        matches.sort_by(|a, b| b.2.cmp(&a.2));

        // Reverse before pushing so the stack pops longest-first.
        for (suffix, rewritten, _) in matches.into_iter().rev() {
            let mut chain = Vec::with_capacity(frame.chain.len() + 1);
            chain.push(suffix);
            chain.extend_from_slice(&frame.chain);
            self.stack.push(Frame {
                remainder: rewritten,
                chain,
            });
        }

        Ok(())
    }
}

impl Iterator for Decompositions<'_> {
    type Item = Result<WordAnalysis, MorfixError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(analysis) = self.ready.pop_front() {
                return Some(Ok(analysis));
            }
            if self.failed {
                return None;
            }
            let frame = self.stack.pop()?;
            if let Err(e) = self.expand(frame) {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

/// The word as recorded at discovery time: this frame's remainder plus all
/// stripped suffix texts. Rewrites deeper in the search never revise it.
fn original_word(remainder: &str, chain: &[SuffixAnalysis]) -> String {
    let mut word = remainder.to_string();
    for suffix in chain {
        word.push_str(&suffix.suffix);
    }
    word
}
