//! Responsible with converting source text into a token stream

use crate::lexer::token_parsing::{parse_token, Scanned};
use nom::Finish;
use sprig_tokens::spanned::Span;
use sprig_tokens::token::{Token, TokenKind};
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;
use std::string::FromUtf8Error;
use thiserror::Error;
use tracing::{trace, warn};

mod token_parsing;

/// Responsible with converting source text into a token stream.
///
/// The lexer owns the complete source. Malformed input never stops lexing, it produces
/// [TokenKind::Error] tokens instead. The last token produced is always a single
/// [TokenKind::EndOfText].
///
/// # Examples
/// ```
/// # use sprig_ast_parsing::lexer::Lexer;
/// # use sprig_tokens::token::TokenKind;
/// let tokens = Lexer::new("x <- 5,000").produce_all_tokens();
/// let kinds = tokens.iter().map(|t| t.kind()).collect::<Vec<_>>();
/// assert_eq!(
///     kinds,
///     [TokenKind::Identifier, TokenKind::Becomes, TokenKind::IntLiteral, TokenKind::EndOfText]
/// );
/// ```
#[derive(Debug)]
pub struct Lexer {
    source: String,
    offset: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    /// Creates a new lexer over some source text
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Creates a new lexer by reading everything from a reader
    pub fn from_reader<R: Read>(mut reader: R) -> LexResult<Self> {
        let mut buffer = vec![];
        reader.read_to_end(&mut buffer)?;
        Ok(Self::new(String::from_utf8(buffer)?))
    }

    /// Creates a new lexer from a path
    pub fn read_path(path: &Path) -> LexResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// The complete source text this lexer scans
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Scans every remaining token, ending with [TokenKind::EndOfText].
    ///
    /// Consumes the lexer, releasing the source text.
    pub fn produce_all_tokens(self) -> Vec<Token> {
        let tokens = self.collect::<Vec<_>>();
        trace!("produced {} tokens", tokens.len());
        tokens
    }

    fn next_token(&mut self) -> Token {
        let rest = &self.source[self.offset..];
        let (separators, text, kind, spelling) = match parse_token(rest).finish() {
            Ok((_, Scanned {
                separators,
                text,
                kind,
                spelling,
            })) => (separators.len(), text.len(), kind, spelling.to_string()),
            Err(error) => {
                warn!("no token rule matched at offset {}: {error}", self.offset);
                let len = rest.chars().next().map_or(0, char::len_utf8);
                let kind = if len == 0 {
                    TokenKind::EndOfText
                } else {
                    TokenKind::Error
                };
                (0, len, kind, rest[..len].to_string())
            }
        };

        let start = self.offset + separators;
        let (line, column) = advance_position(self.line, self.column, &self.source[self.offset..start]);
        let end = start + text;
        let (next_line, next_column) = advance_position(line, column, &self.source[start..end]);
        self.offset = end;
        self.line = next_line;
        self.column = next_column;

        let token = Token::new(Span::new(start, text, line, column), kind, spelling);
        trace!("scanned {token:?}");
        token
    }
}

/// Moves a line and column past `text`
fn advance_position(mut line: usize, mut column: usize, text: &str) -> (usize, usize) {
    for c in text.chars() {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

impl Iterator for Lexer {
    type Item = Token;

    /// Pulls the next token. Yields [TokenKind::EndOfText] once, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::EndOfText) {
            self.finished = true;
        }
        Some(token)
    }
}

type LexResult<T> = Result<T, LexingError>;

/// An error occurring while reading source text for lexing
#[derive(Debug, Error)]
pub enum LexingError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("source is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
