use crate::parser::{Parsed, SyntacticParser};
use sprig_ast::prelude::*;
use sprig_tokens::spanned::Spanned;
use sprig_tokens::token::TokenKind;

impl SyntacticParser<'_> {
    /// `single-declaration (';' single-declaration)*`
    pub(super) fn declaration(&mut self) -> Parsed<Declaration> {
        self.rule("declaration", |parser| {
            let first = parser.single_declaration()?;
            let mut rest = vec![];
            while parser.accept(TokenKind::Semicolon).is_some() {
                rest.push(parser.single_declaration()?);
            }
            Ok(Declaration::sequence(first, rest))
        })
    }

    fn single_declaration(&mut self) -> Parsed<Declaration> {
        self.rule("single declaration", |parser| {
            let start = parser.expect(TokenKind::Dec)?.span();
            let identifier = Identifier::from(parser.expect(TokenKind::Identifier)?);
            parser.expect(TokenKind::As)?;

            if parser.accept(TokenKind::Const).is_some() {
                parser.expect(TokenKind::Becomes)?;
                let expr = parser.expression()?;
                Ok(Declaration::Const(DeclarationConst {
                    identifier,
                    expr,
                    span: parser.span_from(start),
                }))
            } else if parser.accept(TokenKind::Var).is_some() {
                parser.expect(TokenKind::Colon)?;
                let type_denoter = parser.type_denoter()?;
                parser.expect(TokenKind::Becomes)?;
                let expr = parser.expression()?;
                Ok(Declaration::Var(DeclarationVar {
                    identifier,
                    type_denoter,
                    expr,
                    span: parser.span_from(start),
                }))
            } else {
                Err(parser.unexpected([TokenKind::Const, TokenKind::Var]))
            }
        })
    }

    fn type_denoter(&mut self) -> Parsed<TypeDenoter> {
        self.rule("type denoter", |parser| {
            let identifier = parser.expect(TokenKind::Identifier)?;
            Ok(TypeDenoter::new(Identifier::from(identifier)))
        })
    }
}
