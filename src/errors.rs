//! Morfix error handling.
//!
//! One diagnostic type covers every failure the crate can produce: lexical
//! and syntactic errors while loading a grammar, lookup failures during
//! generation, lazily surfaced condition-pattern errors, and exporter
//! overflow. Everything renders through `miette` with the grammar source
//! attached, so a CLI user sees the offending line underlined.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

/// Convert an internal byte span into a miette source span.
pub fn to_source_span(span: Span) -> SourceSpan {
    (span.start, span.end.saturating_sub(span.start)).into()
}

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// The grammar text an error points into, kept alongside its display name.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Use only when no grammar text is available (I/O failures, direct
    /// model construction in tests).
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "<no source>".to_string(),
            content: format!("# {context}"),
        }
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::fallback("no grammar loaded")
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// The single error type: what went wrong, where, and how to help.
#[derive(Debug)]
pub struct MorfixError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

/// Everything that can go wrong, as a clean enum.
///
/// Lexical and syntactic kinds carry `line:column` directly so the message
/// stays useful even when rendered without the miette source snippet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Lexical errors
    #[error("unrecognized character '{ch}' at {line}:{column}")]
    UnexpectedCharacter { ch: char, line: u32, column: u32 },
    #[error("unterminated {what} starting at {line}:{column}")]
    UnterminatedLiteral {
        what: &'static str,
        line: u32,
        column: u32,
    },

    // Syntactic errors
    #[error("expected {expected}, found {found} at {line}:{column}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
        column: u32,
    },
    #[error("invalid number '{value}' at {line}:{column}")]
    InvalidNumber {
        value: String,
        line: u32,
        column: u32,
    },

    // Lookup errors: fail only the offending call
    #[error("no rule named '{name}'")]
    RuleNotFound { name: String },
    #[error("no suffix set named '{name}'")]
    SuffixSetNotFound { name: String },

    // Condition-pattern errors, raised at first evaluation
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Exporter errors
    #[error("affix flag space exhausted: more than {limit} suffix sets")]
    FlagSpaceExhausted { limit: usize },

    // I/O errors at grammar-load time
    #[error("cannot read grammar file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Where the error happened.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

/// Diagnostic enhancement data.
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

/// Coarse error category, for assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lex,
    Parse,
    Lookup,
    Pattern,
    Export,
    Io,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnexpectedCharacter { .. } | Self::UnterminatedLiteral { .. } => {
                ErrorCategory::Lex
            }
            Self::UnexpectedToken { .. } | Self::InvalidNumber { .. } => ErrorCategory::Parse,
            Self::RuleNotFound { .. } | Self::SuffixSetNotFound { .. } => ErrorCategory::Lookup,
            Self::InvalidPattern { .. } => ErrorCategory::Pattern,
            Self::FlagSpaceExhausted { .. } => ErrorCategory::Export,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter { .. } => "unexpected_character",
            Self::UnterminatedLiteral { .. } => "unterminated_literal",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::RuleNotFound { .. } => "rule_not_found",
            Self::SuffixSetNotFound { .. } => "suffix_set_not_found",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::FlagSpaceExhausted { .. } => "flag_space_exhausted",
            Self::Io { .. } => "io",
        }
    }
}

impl MorfixError {
    /// Build an error pointing into the given grammar source.
    pub fn new(kind: ErrorKind, source: &SourceContext, span: Span) -> Self {
        let code = format!("morfix::{}", kind.code_suffix());
        Self {
            kind,
            source_info: SourceInfo {
                source: source.to_named_source(),
                primary_span: to_source_span(span),
            },
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code: code,
            },
        }
    }

    /// Build an error with no useful source location (lookup failures,
    /// lazy pattern errors, I/O).
    pub fn bare(kind: ErrorKind) -> Self {
        Self::new(kind, &SourceContext::default(), Span::default())
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::UnexpectedCharacter { .. } => "unrecognized character".into(),
            ErrorKind::UnterminatedLiteral { what, .. } => format!("unterminated {what}"),
            ErrorKind::UnexpectedToken { expected, .. } => format!("expected {expected} here"),
            ErrorKind::InvalidNumber { .. } => "invalid number".into(),
            ErrorKind::RuleNotFound { .. } => "unknown rule".into(),
            ErrorKind::SuffixSetNotFound { .. } => "unknown suffix set".into(),
            ErrorKind::InvalidPattern { .. } => "invalid pattern".into(),
            ErrorKind::FlagSpaceExhausted { .. } => "too many suffix sets".into(),
            ErrorKind::Io { .. } => "I/O failure".into(),
        }
    }
}

impl std::error::Error for MorfixError {}

impl fmt::Display for MorfixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for MorfixError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}
