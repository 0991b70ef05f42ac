use itertools::Itertools;
use sprig_tokens::spanned::Span;
use sprig_tokens::token::{Token, TokenKind};
use sprig_tokens::SpannedError;
use std::fmt::{Display, Formatter, Write as _};

/// Represents an error occurring during parsing
#[derive(Debug, Clone, thiserror::Error)]
pub struct SyntaxError {
    pub kind: SpannedError<ErrorKind>,
    pub non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind,
        location: impl Into<Option<Span>>,
        non_terminals: impl Into<Vec<&'static str>>,
    ) -> Self {
        Self {
            kind: SpannedError::new(kind, location),
            non_terminal_stack: non_terminals.into(),
        }
    }

    /// Where the offending token is
    pub fn location(&self) -> Option<Span> {
        self.kind.location()
    }

    pub fn error_kind(&self) -> &ErrorKind {
        self.kind.error()
    }

    /// Renders this error with a snippet of `src`, followed by the rules that were being parsed
    pub fn render(&self, src: &str) -> String {
        let mut out = format!("syntax error: {}", self.kind.render(src));
        if !self.non_terminal_stack.is_empty() {
            let _ = writeln!(out, "non terminal stack:");
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                let _ = writeln!(out, "  {idx}: {non_terminal}");
            }
        }
        out
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error: {}", self.kind)
    }
}

/// The token that was actually present where something else was expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub kind: TokenKind,
    pub spelling: String,
}

impl From<&Token> for Found {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind(),
            spelling: token.spelling().to_string(),
        }
    }
}

impl Display for Found {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.kind.fixed_spelling().is_some() || self.kind == TokenKind::EndOfText {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} `{}`", self.kind, self.spelling)
        }
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {}, found {found}", .expected.iter().join(" or "))]
    ExpectedToken {
        expected: Vec<TokenKind>,
        found: Found,
    },
    #[error("expected {expected}, found {found}")]
    ExpectedConstruct {
        expected: &'static str,
        found: Found,
    },
    #[error("nesting too deep, more than {limit} rules open at {found}")]
    NestingTooDeep { limit: usize, found: Found },
}

impl ErrorKind {
    pub fn expected_token(
        token_kinds: impl IntoIterator<Item = TokenKind>,
        found: impl Into<Found>,
    ) -> Self {
        Self::ExpectedToken {
            expected: token_kinds.into_iter().collect(),
            found: found.into(),
        }
    }

    pub fn expected_construct(construct: &'static str, found: impl Into<Found>) -> Self {
        Self::ExpectedConstruct {
            expected: construct,
            found: found.into(),
        }
    }

    /// The token that was present instead
    pub fn found(&self) -> &Found {
        match self {
            ErrorKind::ExpectedToken { found, .. } => found,
            ErrorKind::ExpectedConstruct { found, .. } => found,
            ErrorKind::NestingTooDeep { found, .. } => found,
        }
    }
}
