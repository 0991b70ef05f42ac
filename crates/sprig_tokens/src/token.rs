//! A lexical token from a source file

use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// A lexical token from a source file
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    span: Span,
    kind: TokenKind,
    spelling: String,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind, spelling: impl Into<String>) -> Self {
        Self {
            span,
            kind,
            spelling: spelling.into(),
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The source text captured for this token.
    ///
    /// For character literals this is the character between the quotes.
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Checks if this token is of a given kind
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind, self.spelling, self.span)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

/// The kind for this token
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum TokenKind {
    Identifier,
    IntLiteral,
    CharLiteral,
    /// one of `+ - * / < > = \`
    Operator,
    /// `<-`
    Becomes,
    /// `~`
    Is,
    Colon,
    Semicolon,
    /// `(`
    LeftBracket,
    /// `)`
    RightBracket,
    /// `[`
    LeftSquareBracket,
    /// `]`
    RightSquareBracket,
    /// Will only appear as the last token of a source
    EndOfText,
    /// A malformed token
    Error,

    // keywords
    Declare,
    Global,
    Do,
    Begin,
    End,
    Let,
    In,
    EndLet,
    If,
    EndIf,
    While,
    After,
    Wend,
    Dec,
    As,
    Const,
    Var,
    Void,
}

impl TokenKind {
    /// Looks up the keyword with exactly this spelling
    pub fn keyword(spelling: &str) -> Option<TokenKind> {
        let kind = match spelling {
            "declare" => TokenKind::Declare,
            "global" => TokenKind::Global,
            "do" => TokenKind::Do,
            "begin" => TokenKind::Begin,
            "end" => TokenKind::End,
            "let" => TokenKind::Let,
            "in" => TokenKind::In,
            "endlet" => TokenKind::EndLet,
            "if" => TokenKind::If,
            "endif" => TokenKind::EndIf,
            "while" => TokenKind::While,
            "after" => TokenKind::After,
            "wend" => TokenKind::Wend,
            "dec" => TokenKind::Dec,
            "as" => TokenKind::As,
            "const" => TokenKind::Const,
            "var" => TokenKind::Var,
            "void" => TokenKind::Void,
            _ => return None,
        };
        Some(kind)
    }

    /// The fixed spelling of a keyword or punctuation token kind
    pub fn fixed_spelling(&self) -> Option<&'static str> {
        let spelling = match self {
            TokenKind::Becomes => "<-",
            TokenKind::Is => "~",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::LeftBracket => "(",
            TokenKind::RightBracket => ")",
            TokenKind::LeftSquareBracket => "[",
            TokenKind::RightSquareBracket => "]",
            TokenKind::Declare => "declare",
            TokenKind::Global => "global",
            TokenKind::Do => "do",
            TokenKind::Begin => "begin",
            TokenKind::End => "end",
            TokenKind::Let => "let",
            TokenKind::In => "in",
            TokenKind::EndLet => "endlet",
            TokenKind::If => "if",
            TokenKind::EndIf => "endif",
            TokenKind::While => "while",
            TokenKind::After => "after",
            TokenKind::Wend => "wend",
            TokenKind::Dec => "dec",
            TokenKind::As => "as",
            TokenKind::Const => "const",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::Identifier
            | TokenKind::IntLiteral
            | TokenKind::CharLiteral
            | TokenKind::Operator
            | TokenKind::EndOfText
            | TokenKind::Error => return None,
        };
        Some(spelling)
    }

    /// Checks if this kind is a reserved word
    pub fn is_keyword(&self) -> bool {
        self.fixed_spelling()
            .is_some_and(|s| s.starts_with(|c: char| c.is_ascii_alphabetic()))
    }

    /// Iterates over every keyword kind
    pub fn keywords() -> impl Iterator<Item = TokenKind> {
        TokenKind::iter().filter(TokenKind::is_keyword)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.fixed_spelling() {
            Some(spelling) => write!(f, "'{spelling}'"),
            None => {
                let name: &'static str = self.into();
                write!(f, "{name}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_total() {
        let keywords = TokenKind::keywords().collect::<Vec<_>>();
        assert_eq!(keywords.len(), 18);
        for kind in keywords {
            let spelling = kind.fixed_spelling().unwrap();
            assert_eq!(TokenKind::keyword(spelling), Some(kind));
        }
    }

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("While"), None);
        assert_eq!(TokenKind::keyword("whilst"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::Becomes.to_string(), "'<-'");
        assert_eq!(TokenKind::EndLet.to_string(), "'endlet'");
        assert_eq!(TokenKind::IntLiteral.to_string(), "IntLiteral");
    }

    #[test]
    fn test_token_accessors() {
        let token = Token::new(Span::new(0, 3, 1, 1), TokenKind::CharLiteral, "a");
        assert!(token.is(TokenKind::CharLiteral));
        assert_eq!(token.spelling(), "a");
        assert_eq!(token.span().len(), 3);
        assert_eq!(format!("{token:?}"), "CharLiteral(\"a\")@1:1");
    }
}
