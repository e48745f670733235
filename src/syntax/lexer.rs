//! Hand-written tokenizer for the grammar DSL.
//!
//! Converts UTF-8 source text into a flat token stream. Whitespace and
//! `#`-to-end-of-line comments are skipped. Strings and regex patterns use
//! copy-through backslash handling rather than a true escape table: inside a
//! string `\x` yields `x`, inside a regex `\x` yields `\x` so regex escapes
//! survive intact.
//!
//! `[...]` is ambiguous in the DSL: after `ENDSWITH`/`STARTSWITH` it is a raw
//! character set, everywhere else `[` `]` bracket an optional rule element.
//! The lexer resolves this with one token of lookbehind.

use crate::errors::{ErrorKind, MorfixError, SourceContext};
use crate::syntax::{Span, Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    source: &'a SourceContext,
    pos: usize,
    line: u32,
    column: u32,
    prev_kind: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            input: &source.content,
            source,
            pos: 0,
            line: 1,
            column: 1,
            prev_kind: None,
        }
    }

    /// Tokenize the whole input, ending with an EOF token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, MorfixError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            if let Some(token) = self.next_token()? {
                self.prev_kind = Some(token.kind);
                tokens.push(token);
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            line: self.line,
            column: self.column,
            span: Span::new(self.pos, self.pos),
        });
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, MorfixError> {
        let start = self.mark();
        let current = self.peek().expect("next_token called at end of input");

        if current == '#' {
            self.skip_comment();
            return Ok(None);
        }

        if current == '/' && self.peek_second().is_some() {
            return self.read_regex(start).map(Some);
        }

        // Character sets only exist as condition operands.
        if current == '['
            && matches!(
                self.prev_kind,
                Some(TokenKind::EndsWith) | Some(TokenKind::StartsWith)
            )
        {
            return self.read_charset(start).map(Some);
        }

        let punct = match current {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '+' => Some(TokenKind::Plus),
            '@' => Some(TokenKind::At),
            _ => None,
        };
        if let Some(kind) = punct {
            self.bump();
            return Ok(Some(self.token(kind, current.to_string(), start)));
        }

        if current == '"' {
            return self.read_string(start).map(Some);
        }

        if current.is_ascii_digit() {
            return Ok(Some(self.read_number(start)));
        }

        // Identifiers may start with a leading hyphen so suffix spellings
        // like `-у` stay one token.
        if current.is_alphabetic()
            || current == '_'
            || (current == '-' && self.peek_second().is_some_and(|c| c.is_alphabetic()))
        {
            return Ok(Some(self.read_identifier(start)));
        }

        Err(MorfixError::new(
            ErrorKind::UnexpectedCharacter {
                ch: current,
                line: start.line,
                column: start.column,
            },
            self.source,
            Span::new(start.pos, start.pos + current.len_utf8()),
        ))
    }

    // ------------------------------------------------------------------
    // Scanners
    // ------------------------------------------------------------------

    fn read_string(&mut self, start: Mark) -> Result<Token, MorfixError> {
        let mut text = String::new();
        self.bump(); // opening quote

        loop {
            match self.peek() {
                None => return Err(self.unterminated("string", start)),
                Some('"') => break,
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        // Backslash followed by any character copies that
                        // character literally.
                        Some(escaped) => {
                            text.push(escaped);
                            self.bump();
                        }
                        None => return Err(self.unterminated("string", start)),
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
            }
        }

        self.bump(); // closing quote
        Ok(self.token(TokenKind::Str, text, start))
    }

    fn read_regex(&mut self, start: Mark) -> Result<Token, MorfixError> {
        let mut pattern = String::new();
        self.bump(); // opening '/'

        loop {
            match self.peek() {
                None => return Err(self.unterminated("regex pattern", start)),
                Some('/') => break,
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        // Keep both characters so regex escapes survive.
                        Some(escaped) => {
                            pattern.push('\\');
                            pattern.push(escaped);
                            self.bump();
                        }
                        None => return Err(self.unterminated("regex pattern", start)),
                    }
                }
                Some(c) => {
                    pattern.push(c);
                    self.bump();
                }
            }
        }

        self.bump(); // closing '/'
        Ok(self.token(TokenKind::Regex, pattern, start))
    }

    fn read_charset(&mut self, start: Mark) -> Result<Token, MorfixError> {
        let mut chars = String::new();
        self.bump(); // opening '['

        // Raw until the first ']': no nesting, no escapes.
        loop {
            match self.peek() {
                None => return Err(self.unterminated("character set", start)),
                Some(']') => break,
                Some(c) => {
                    chars.push(c);
                    self.bump();
                }
            }
        }

        self.bump(); // closing ']'
        Ok(self.token(TokenKind::CharSet, chars, start))
    }

    fn read_number(&mut self, start: Mark) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }
        self.token(TokenKind::Number, text, start)
    }

    fn read_identifier(&mut self, start: Mark) -> Token {
        let mut text = String::new();

        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            text.push(c);
            self.bump();
        }

        let kind = match text.to_uppercase().as_str() {
            "SUFFIX" => TokenKind::Suffix,
            "RULE" => TokenKind::Rule,
            "WHEN" => TokenKind::When,
            "ENDSWITH" => TokenKind::EndsWith,
            "STARTSWITH" => TokenKind::StartsWith,
            "ISVOWEL" => TokenKind::IsVowel,
            "ISCONSONANT" => TokenKind::IsConsonant,
            "CUT" => TokenKind::Cut,
            "REPLACE" => TokenKind::Replace,
            _ => TokenKind::Identifier,
        };
        self.token(kind, text, start)
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn token(&self, kind: TokenKind, text: String, start: Mark) -> Token {
        Token {
            kind,
            text,
            line: start.line,
            column: start.column,
            span: Span::new(start.pos, self.pos),
        }
    }

    fn unterminated(&self, what: &'static str, start: Mark) -> MorfixError {
        MorfixError::new(
            ErrorKind::UnterminatedLiteral {
                what,
                line: start.line,
                column: start.column,
            },
            self.source,
            Span::new(start.pos, self.pos),
        )
    }
}

/// A saved cursor position marking the start of a token.
#[derive(Debug, Copy, Clone)]
struct Mark {
    pos: usize,
    line: u32,
    column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let source = SourceContext::from_file("test.mgr", src);
        Lexer::new(&source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn punctuation_and_identifiers() {
        assert_eq!(
            kinds("plural { lar }"),
            vec![
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::Identifier,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("suffix Rule wHeN endswith"),
            vec![
                TokenKind::Suffix,
                TokenKind::Rule,
                TokenKind::When,
                TokenKind::EndsWith,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn charset_only_after_condition_keyword() {
        // After ENDSWITH, a raw character set.
        assert_eq!(
            kinds("ENDSWITH [abc]"),
            vec![TokenKind::EndsWith, TokenKind::CharSet, TokenKind::Eof]
        );
        // Elsewhere, plain brackets around an identifier.
        assert_eq!(
            kinds("[lar]"),
            vec![
                TokenKind::LBracket,
                TokenKind::Identifier,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn hyphen_leading_identifier() {
        let source = SourceContext::from_file("test.mgr", "-у");
        let tokens = Lexer::new(&source).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "-у");
    }

    #[test]
    fn string_escapes_copy_through() {
        let source = SourceContext::from_file("test.mgr", r#""a\"b""#);
        let tokens = Lexer::new(&source).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].text, "a\"b");
    }

    #[test]
    fn regex_keeps_backslash_escapes() {
        let source = SourceContext::from_file("test.mgr", r"/ab\/c\d/");
        let tokens = Lexer::new(&source).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Regex);
        assert_eq!(tokens[0].text, r"ab\/c\d");
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let source = SourceContext::from_file("test.mgr", "\"abc");
        let err = Lexer::new(&source).tokenize().unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::UnterminatedLiteral { what: "string", .. }
        ));
    }

    #[test]
    fn unknown_character_reports_position() {
        let source = SourceContext::from_file("test.mgr", "ok\n  %");
        let err = Lexer::new(&source).tokenize().unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnexpectedCharacter {
                ch: '%',
                line: 2,
                column: 3
            }
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("# heading\nlar # trailing\n"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }
}
