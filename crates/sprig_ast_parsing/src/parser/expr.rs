use crate::parser::{Parsed, SyntacticParser};
use sprig_ast::prelude::*;
use sprig_tokens::spanned::Spanned;
use sprig_tokens::token::TokenKind;

impl SyntacticParser<'_> {
    /// `primary (operator primary)*`, folded to the left
    pub(super) fn expression(&mut self) -> Parsed<Expr> {
        self.rule("expression", |parser| {
            let mut expr = parser.primary_expression()?;
            while let Some(operator) = parser.accept(TokenKind::Operator) {
                let right = parser.primary_expression()?;
                expr = Expr::Binary(ExprBinary::new(expr, Operator::from(operator), right));
            }
            Ok(expr)
        })
    }

    fn primary_expression(&mut self) -> Parsed<Expr> {
        self.rule("primary expression", |parser| match parser.current().kind() {
            TokenKind::IntLiteral => Ok(Expr::IntegerLiteral(IntegerLiteral::from(
                parser.advance(),
            ))),
            TokenKind::CharLiteral => Ok(Expr::CharacterLiteral(CharacterLiteral::from(
                parser.advance(),
            ))),
            TokenKind::Identifier => {
                let identifier = Identifier::from(parser.advance());
                let start = identifier.span;
                let call = if parser.accept(TokenKind::LeftSquareBracket).is_some() {
                    let parameter = parser.parameter()?;
                    parser.expect(TokenKind::RightSquareBracket)?;
                    Some(parameter)
                } else {
                    None
                };
                Ok(Expr::Identifier(ExprIdentifier::new(
                    identifier,
                    call,
                    parser.span_from(start),
                )))
            }
            TokenKind::Operator => {
                let operator = Operator::from(parser.advance());
                let operand = parser.primary_expression()?;
                Ok(Expr::Unary(ExprUnary::new(operator, operand)))
            }
            TokenKind::LeftBracket => {
                parser.advance();
                let expr = parser.expression()?;
                parser.expect(TokenKind::RightBracket)?;
                Ok(expr)
            }
            _ => Err(parser.expected_construct("an expression")),
        })
    }

    /// `'void' | 'const' expression | 'var' identifier`
    pub(super) fn parameter(&mut self) -> Parsed<Parameter> {
        self.rule("parameter", |parser| match parser.current().kind() {
            TokenKind::Void => Ok(Parameter::Void(parser.advance().span())),
            TokenKind::Const => {
                let start = parser.advance().span();
                let expr = parser.expression()?;
                Ok(Parameter::Const(ParameterConst {
                    expr,
                    span: parser.span_from(start),
                }))
            }
            TokenKind::Var => {
                let start = parser.advance().span();
                let identifier = Identifier::from(parser.expect(TokenKind::Identifier)?);
                Ok(Parameter::Var(ParameterVar {
                    identifier,
                    span: parser.span_from(start),
                }))
            }
            _ => Err(parser.unexpected([TokenKind::Void, TokenKind::Const, TokenKind::Var])),
        })
    }
}
