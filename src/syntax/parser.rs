//! Recursive-descent parser for the grammar DSL.
//!
//! Walks the token stream produced by the lexer and builds the full
//! `Grammar`, or fails with the first syntax error. There are no partial
//! results: a grammar either loads completely or not at all.
//!
//! Top level:
//!
//! ```text
//! SUFFIX name [: "desc"] { suffix : "desc" [WHEN cond [CUT n | REPLACE "t"]], ... }
//! RULE   name [: "desc"] { element [+ element]..., alternative, ... }
//! ```

use std::collections::BTreeMap;

use tracing::warn;

use crate::errors::{ErrorKind, MorfixError, SourceContext};
use crate::grammar::{
    Condition, ConditionTest, Grammar, Operand, Rewrite, Rule, RuleElement, SuffixDefinition,
    SuffixSet,
};
use crate::syntax::{Lexer, Token, TokenKind};

/// Lex and parse grammar source text in one step.
pub fn parse_grammar(source: &SourceContext) -> Result<Grammar, MorfixError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens, source).parse()
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'a SourceContext,
    next_rule_id: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, source: &'a SourceContext) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            next_rule_id: 1,
        }
    }

    pub fn parse(mut self) -> Result<Grammar, MorfixError> {
        let mut grammar = Grammar::default();

        while self.current().kind != TokenKind::Eof {
            match self.current().kind {
                TokenKind::Suffix => {
                    let set = self.parse_suffix_set()?;
                    grammar.suffix_sets.insert(set.name.clone(), set);
                }
                TokenKind::Rule => {
                    let rule = self.parse_rule()?;
                    grammar.rules.entry(rule.name.clone()).or_default().push(rule);
                }
                _ => return Err(self.unexpected("SUFFIX or RULE")),
            }
        }

        Ok(grammar)
    }

    // ------------------------------------------------------------------
    // Suffix sets
    // ------------------------------------------------------------------

    fn parse_suffix_set(&mut self) -> Result<SuffixSet, MorfixError> {
        self.expect(TokenKind::Suffix)?;
        let name = self.expect(TokenKind::Identifier)?.text;
        let description = self.parse_optional_description()?;
        self.expect(TokenKind::LBrace)?;

        let mut suffixes: BTreeMap<String, SuffixDefinition> = BTreeMap::new();

        while self.current().kind != TokenKind::RBrace {
            let def = self.parse_suffix_definition()?;
            if suffixes.contains_key(&def.suffix) {
                warn!(
                    set = %name,
                    suffix = %def.suffix,
                    "duplicate suffix declaration; last one wins"
                );
            }
            suffixes.insert(def.suffix.clone(), def);

            match self.current().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBrace => {}
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.expect(TokenKind::RBrace)?;
        Ok(SuffixSet {
            name,
            description,
            suffixes,
        })
    }

    fn parse_suffix_definition(&mut self) -> Result<SuffixDefinition, MorfixError> {
        let suffix = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Colon)?;
        let description = self.expect(TokenKind::Str)?.text;

        let mut condition = Condition::default();
        if self.current().kind == TokenKind::When {
            self.advance();
            condition = self.parse_condition()?;
        }

        Ok(SuffixDefinition {
            suffix,
            description,
            condition,
        })
    }

    fn parse_condition(&mut self) -> Result<Condition, MorfixError> {
        let test = match self.current().kind {
            TokenKind::EndsWith => {
                self.advance();
                ConditionTest::EndsWith(self.parse_operand()?)
            }
            TokenKind::StartsWith => {
                self.advance();
                ConditionTest::StartsWith(self.parse_operand()?)
            }
            TokenKind::IsVowel => {
                self.advance();
                ConditionTest::IsVowel
            }
            TokenKind::IsConsonant => {
                self.advance();
                ConditionTest::IsConsonant
            }
            // `WHEN CUT 2` and friends: a bare rewrite with no test.
            _ => ConditionTest::None,
        };

        // CUT is checked before REPLACE; the first clause wins.
        let rewrite = match self.current().kind {
            TokenKind::Cut => {
                self.advance();
                Rewrite::Cut(self.parse_count()?)
            }
            TokenKind::Replace => {
                self.advance();
                Rewrite::Replace(self.expect(TokenKind::Str)?.text)
            }
            _ => Rewrite::Keep,
        };

        // A trailing second clause is ambiguous in the DSL; consume and
        // ignore it with a warning rather than tripping over it later.
        match self.current().kind {
            TokenKind::Cut => {
                let token = self.advance();
                self.parse_count()?;
                warn!(line = token.line, "extra CUT clause ignored; the first rewrite wins");
            }
            TokenKind::Replace => {
                let token = self.advance();
                self.expect(TokenKind::Str)?;
                warn!(line = token.line, "extra REPLACE clause ignored; the first rewrite wins");
            }
            _ => {}
        }

        Ok(Condition { test, rewrite })
    }

    fn parse_operand(&mut self) -> Result<Operand, MorfixError> {
        match self.current().kind {
            TokenKind::CharSet => {
                let token = self.advance();
                Ok(Operand::Chars(token.text.chars().collect()))
            }
            TokenKind::Regex => {
                let token = self.advance();
                Ok(Operand::Pattern(token.text))
            }
            _ => Err(self.unexpected("character set or regex pattern")),
        }
    }

    fn parse_count(&mut self) -> Result<usize, MorfixError> {
        let token = self.expect(TokenKind::Number)?;
        token.text.parse().map_err(|_| {
            MorfixError::new(
                ErrorKind::InvalidNumber {
                    value: token.text.clone(),
                    line: token.line,
                    column: token.column,
                },
                self.source,
                token.span,
            )
        })
    }

    // ------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------

    fn parse_rule(&mut self) -> Result<Rule, MorfixError> {
        self.expect(TokenKind::Rule)?;
        let name = self.expect(TokenKind::Identifier)?.text;
        let description = self.parse_optional_description()?;
        self.expect(TokenKind::LBrace)?;

        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.parse_alternative()?);
            if self.current().kind == TokenKind::Comma {
                self.advance();
                // A trailing comma before '}' is not another alternative.
                if self.current().kind == TokenKind::RBrace {
                    break;
                }
            } else {
                break;
            }
        }

        self.expect(TokenKind::RBrace)?;

        let id = self.next_rule_id;
        self.next_rule_id += 1;
        Ok(Rule {
            name,
            description,
            alternatives,
            id,
        })
    }

    fn parse_alternative(&mut self) -> Result<Vec<RuleElement>, MorfixError> {
        let mut elements = Vec::new();

        while !matches!(
            self.current().kind,
            TokenKind::Comma | TokenKind::RBrace | TokenKind::Eof
        ) {
            elements.push(self.parse_element()?);
            if self.current().kind == TokenKind::Plus {
                self.advance();
            }
        }

        Ok(elements)
    }

    fn parse_element(&mut self) -> Result<RuleElement, MorfixError> {
        match self.current().kind {
            TokenKind::LBrace => {
                self.advance();
                let mut map = BTreeMap::new();
                loop {
                    let literal = self.expect(TokenKind::Identifier)?.text;
                    self.expect(TokenKind::Colon)?;
                    let description = self.expect(TokenKind::Str)?.text;
                    map.insert(literal, description);

                    if self.current().kind == TokenKind::Comma {
                        self.advance();
                    } else {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace)?;
                Ok(RuleElement::LiteralWithDescription(map))
            }
            TokenKind::LBracket => {
                self.advance();
                let child = self.parse_element()?;
                self.expect(TokenKind::RBracket)?;
                Ok(RuleElement::Optional(Box::new(child)))
            }
            TokenKind::At => {
                self.advance();
                let name = self.expect(TokenKind::Identifier)?.text;
                Ok(RuleElement::SuffixSetRef(name))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(RuleElement::Literal(token.text))
            }
            _ => Err(self.unexpected("rule element")),
        }
    }

    // ------------------------------------------------------------------
    // Token stream plumbing
    // ------------------------------------------------------------------

    fn parse_optional_description(&mut self) -> Result<String, MorfixError> {
        if self.current().kind == TokenKind::Colon {
            self.advance();
            Ok(self.expect(TokenKind::Str)?.text)
        } else {
            Ok(String::new())
        }
    }

    fn current(&self) -> &Token {
        // The stream always ends with an EOF token.
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream is never empty"))
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, MorfixError> {
        if self.current().kind != kind {
            return Err(self.unexpected(kind.to_string()));
        }
        Ok(self.advance())
    }

    fn unexpected(&self, expected: impl Into<String>) -> MorfixError {
        let token = self.current();
        MorfixError::new(
            ErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: token.kind.to_string(),
                line: token.line,
                column: token.column,
            },
            self.source,
            token.span,
        )
    }
}
