//! Expressions

use crate::parameter::Parameter;
use crate::terminal::{CharacterLiteral, Identifier, IntegerLiteral, Operator};
use crate::ErrorNode;
use sprig_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// An expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    IntegerLiteral(IntegerLiteral),
    CharacterLiteral(CharacterLiteral),
    Identifier(ExprIdentifier),
    Unary(ExprUnary),
    Binary(ExprBinary),
    Error(ErrorNode),
}

impl Expr {
    /// Checks whether this expression is an error placeholder
    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error(_))
    }

    /// Writes this expression so it reads back as a single primary expression
    fn fmt_primary(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Binary(_) => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::IntegerLiteral(e) => e.span(),
            Expr::CharacterLiteral(e) => e.span(),
            Expr::Identifier(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Error(e) => e.span(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::IntegerLiteral(e) => e.fmt(f),
            Expr::CharacterLiteral(e) => e.fmt(f),
            Expr::Identifier(e) => e.fmt(f),
            Expr::Unary(e) => e.fmt(f),
            Expr::Binary(e) => e.fmt(f),
            Expr::Error(e) => e.fmt(f),
        }
    }
}

impl From<ErrorNode> for Expr {
    fn from(value: ErrorNode) -> Self {
        Expr::Error(value)
    }
}

/// A reference to a name, optionally called with a parameter: `f[const 1]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprIdentifier {
    pub identifier: Identifier,
    pub call: Option<Box<Parameter>>,
    pub span: Span,
}

impl ExprIdentifier {
    pub fn new(identifier: Identifier, call: Option<Parameter>, span: Span) -> Self {
        Self {
            identifier,
            call: call.map(Box::new),
            span,
        }
    }
}

impl Display for ExprIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)?;
        if let Some(call) = &self.call {
            write!(f, "[{call}]")?;
        }
        Ok(())
    }
}

/// A prefix operator applied to a primary expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprUnary {
    pub operator: Operator,
    pub operand: Box<Expr>,
    pub span: Span,
}

impl ExprUnary {
    pub fn new(operator: Operator, operand: Expr) -> Self {
        let span = operator.span.join(operand.span());
        Self {
            operator,
            operand: Box::new(operand),
            span,
        }
    }
}

impl Display for ExprUnary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // the space keeps `<` and a following `-` from reading back as `<-`
        write!(f, "{} ", self.operator)?;
        self.operand.fmt_primary(f)
    }
}

/// Two operands joined by an operator. All operators share one precedence level and associate
/// to the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprBinary {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
    pub span: Span,
}

impl ExprBinary {
    pub fn new(left: Expr, operator: Operator, right: Expr) -> Self {
        let span = left.span().join(right.span());
        Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }
}

impl Display for ExprBinary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.left, self.operator)?;
        self.right.fmt_primary(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str, offset: usize) -> Expr {
        Expr::Identifier(ExprIdentifier::new(
            Identifier::new(name, Span::new(offset, name.len(), 1, offset + 1)),
            None,
            Span::new(offset, name.len(), 1, offset + 1),
        ))
    }

    fn op(spelling: &str, offset: usize) -> Operator {
        Operator::new(spelling, Span::new(offset, 1, 1, offset + 1))
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let expr = ExprBinary::new(id("a", 0), op("+", 2), id("bc", 4));
        assert_eq!(expr.span, Span::new(0, 6, 1, 1));
    }

    #[test]
    fn test_right_nested_binary_is_parenthesized() {
        let inner = Expr::Binary(ExprBinary::new(id("b", 5), op("*", 7), id("c", 9)));
        let expr = Expr::Binary(ExprBinary::new(id("a", 0), op("+", 2), inner));
        assert_eq!(expr.to_string(), "a + (b * c)");
    }

    #[test]
    fn test_left_nested_binary_is_flat() {
        let inner = Expr::Binary(ExprBinary::new(id("a", 0), op("+", 2), id("b", 4)));
        let expr = Expr::Binary(ExprBinary::new(inner, op("*", 6), id("c", 8)));
        assert_eq!(expr.to_string(), "a + b * c");
    }

    #[test]
    fn test_unary_display() {
        let expr = Expr::Unary(ExprUnary::new(op("<", 0), id("x", 1)));
        assert_eq!(expr.to_string(), "< x");
    }
}
