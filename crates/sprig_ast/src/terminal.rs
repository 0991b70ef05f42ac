//! Leaf nodes that hold the spelling of a single token

use sprig_tokens::spanned::{Span, Spanned};
use sprig_tokens::token::Token;
use std::fmt::{Display, Formatter};

macro_rules! terminal {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub spelling: String,
            pub span: Span,
        }

        impl $name {
            pub fn new(spelling: impl Into<String>, span: Span) -> Self {
                Self {
                    spelling: spelling.into(),
                    span,
                }
            }
        }

        impl From<Token> for $name {
            fn from(token: Token) -> Self {
                Self::new(token.spelling(), token.span())
            }
        }

        impl Spanned for $name {
            fn span(&self) -> Span {
                self.span
            }
        }
    };
}

terminal!(
    /// A name
    Identifier
);
terminal!(
    /// An integer literal, with any `,` digit separators kept as written
    IntegerLiteral
);
terminal!(
    /// A character literal. The spelling is the character without quotes.
    CharacterLiteral
);
terminal!(
    /// A one character operator
    Operator
);

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

impl CharacterLiteral {
    /// The character this literal denotes
    pub fn value(&self) -> Option<char> {
        self.spelling.chars().next()
    }
}

impl Display for CharacterLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", self.spelling)
    }
}

/// Names the type of a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDenoter {
    pub identifier: Identifier,
}

impl TypeDenoter {
    pub fn new(identifier: Identifier) -> Self {
        Self { identifier }
    }
}

impl Spanned for TypeDenoter {
    fn span(&self) -> Span {
        self.identifier.span()
    }
}

impl Display for TypeDenoter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
