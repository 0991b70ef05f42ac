//! Actual parameters passed in calls

use crate::expr::Expr;
use crate::terminal::Identifier;
use crate::ErrorNode;
use sprig_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// The parameter of a call, `void`, `const <expr>` or `var <identifier>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Void(Span),
    Const(ParameterConst),
    Var(ParameterVar),
    Error(ErrorNode),
}

impl Parameter {
    /// Checks whether this parameter is an error placeholder
    pub fn is_error(&self) -> bool {
        matches!(self, Parameter::Error(_))
    }
}

/// Passes the value of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterConst {
    pub expr: Expr,
    pub span: Span,
}

/// Passes a variable by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterVar {
    pub identifier: Identifier,
    pub span: Span,
}

impl Spanned for Parameter {
    fn span(&self) -> Span {
        match self {
            Parameter::Void(span) => *span,
            Parameter::Const(p) => p.span,
            Parameter::Var(p) => p.span,
            Parameter::Error(e) => e.span(),
        }
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Parameter::Void(_) => write!(f, "void"),
            Parameter::Const(p) => write!(f, "const {}", p.expr),
            Parameter::Var(p) => write!(f, "var {}", p.identifier),
            Parameter::Error(e) => e.fmt(f),
        }
    }
}

impl From<ErrorNode> for Parameter {
    fn from(value: ErrorNode) -> Self {
        Parameter::Error(value)
    }
}
