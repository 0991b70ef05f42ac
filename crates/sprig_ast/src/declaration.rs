//! Declarations

use crate::expr::Expr;
use crate::terminal::{Identifier, TypeDenoter};
use crate::ErrorNode;
use itertools::Itertools;
use sprig_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// A declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Const(DeclarationConst),
    Var(DeclarationVar),
    Sequential(DeclarationSequential),
    Error(ErrorNode),
}

impl Declaration {
    /// Combines declarations written in order.
    ///
    /// A lone declaration is returned as is, otherwise all are wrapped in a
    /// [Declaration::Sequential].
    pub fn sequence(first: Declaration, rest: impl IntoIterator<Item = Declaration>) -> Self {
        let mut declarations = vec![first];
        declarations.extend(rest);
        if declarations.len() == 1 {
            declarations.remove(0)
        } else {
            Declaration::Sequential(DeclarationSequential::new(declarations))
        }
    }

    /// Checks whether this declaration is an error placeholder
    pub fn is_error(&self) -> bool {
        matches!(self, Declaration::Error(_))
    }
}

impl Spanned for Declaration {
    fn span(&self) -> Span {
        match self {
            Declaration::Const(d) => d.span,
            Declaration::Var(d) => d.span,
            Declaration::Sequential(d) => d.span,
            Declaration::Error(e) => e.span(),
        }
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Declaration::Const(d) => write!(f, "dec {} as const <- {}", d.identifier, d.expr),
            Declaration::Var(d) => write!(
                f,
                "dec {} as var : {} <- {}",
                d.identifier, d.type_denoter, d.expr
            ),
            Declaration::Sequential(d) => write!(f, "{}", d.declarations.iter().join("; ")),
            Declaration::Error(e) => e.fmt(f),
        }
    }
}

impl From<ErrorNode> for Declaration {
    fn from(value: ErrorNode) -> Self {
        Declaration::Error(value)
    }
}

/// `dec x as const <- 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationConst {
    pub identifier: Identifier,
    pub expr: Expr,
    pub span: Span,
}

/// `dec x as var : Integer <- 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationVar {
    pub identifier: Identifier,
    pub type_denoter: TypeDenoter,
    pub expr: Expr,
    pub span: Span,
}

/// Two or more declarations, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSequential {
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl DeclarationSequential {
    fn new(declarations: Vec<Declaration>) -> Self {
        let span = declarations
            .iter()
            .map(Spanned::span)
            .reduce(|a, b| a.join(b))
            .unwrap_or_default();
        Self { declarations, span }
    }
}
