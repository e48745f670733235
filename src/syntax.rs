//! Syntax module for the Morfix grammar DSL.
//!
//! Provides the token types shared by the lexer and the recursive-descent
//! parser, with source location tracking for diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod lexer;
pub mod parser;

pub use lexer::Lexer;
pub use parser::Parser;

/// A byte span in the grammar source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Every kind of token the DSL lexer can produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords (matched case-insensitively)
    Suffix,
    Rule,
    When,
    EndsWith,
    StartsWith,
    IsVowel,
    IsConsonant,
    Cut,
    Replace,

    // Literals
    Identifier,
    Str,
    Number,
    /// Raw character set `[...]`, only after ENDSWITH/STARTSWITH.
    CharSet,
    /// Regex pattern `/.../`.
    Regex,

    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Plus,
    At,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Suffix => "SUFFIX",
            TokenKind::Rule => "RULE",
            TokenKind::When => "WHEN",
            TokenKind::EndsWith => "ENDSWITH",
            TokenKind::StartsWith => "STARTSWITH",
            TokenKind::IsVowel => "ISVOWEL",
            TokenKind::IsConsonant => "ISCONSONANT",
            TokenKind::Cut => "CUT",
            TokenKind::Replace => "REPLACE",
            TokenKind::Identifier => "identifier",
            TokenKind::Str => "string",
            TokenKind::Number => "number",
            TokenKind::CharSet => "character set",
            TokenKind::Regex => "regex pattern",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Plus => "'+'",
            TokenKind::At => "'@'",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{name}")
    }
}

/// One token with its text and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({}:{})", self.kind, self.text, self.line, self.column)
    }
}
