//! The root of a syntax tree

use crate::command::Command;
use crate::declaration::Declaration;
use sprig_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// A complete program: `declare global <declarations> do <commands>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub declaration: Declaration,
    pub command: Command,
    pub span: Span,
}

impl Program {
    pub fn new(declaration: Declaration, command: Command, span: Span) -> Self {
        Self {
            declaration,
            command,
            span,
        }
    }

    /// Checks if the declaration or command section failed to parse
    pub fn has_errors(&self) -> bool {
        self.declaration.is_error() || self.command.is_error()
    }
}

impl Spanned for Program {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "declare global {} do {}",
            self.declaration, self.command
        )
    }
}
