#![doc = include_str!("../README.md")]

use sprig_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

pub mod command;
pub mod declaration;
pub mod expr;
pub mod parameter;
pub mod program;
pub mod terminal;

/// Placeholder for a construct that failed to parse.
///
/// Every node family has a variant wrapping this, and `From<ErrorNode>` is implemented for each
/// family so an error can be placed in any slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorNode {
    pub span: Span,
}

impl ErrorNode {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

impl Spanned for ErrorNode {
    fn span(&self) -> Span {
        self.span
    }
}

impl Display for ErrorNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<error>")
    }
}

/// re-exports every node type
pub mod prelude {
    pub use super::{
        command::*, declaration::*, expr::*, parameter::*, program::*, terminal::*, ErrorNode,
    };
}
