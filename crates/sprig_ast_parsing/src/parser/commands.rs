use crate::parser::{Parsed, SyntacticParser};
use sprig_ast::prelude::*;
use sprig_tokens::spanned::Spanned;
use sprig_tokens::token::TokenKind;

impl SyntacticParser<'_> {
    /// `single-command (';' single-command)*`
    pub(super) fn command(&mut self) -> Parsed<Command> {
        self.rule("command", |parser| {
            let first = parser.single_command()?;
            let mut rest = vec![];
            while parser.accept(TokenKind::Semicolon).is_some() {
                rest.push(parser.single_command()?);
            }
            Ok(Command::sequence(first, rest))
        })
    }

    fn single_command(&mut self) -> Parsed<Command> {
        self.rule("single command", |parser| match parser.current().kind() {
            TokenKind::Identifier => parser.assign_or_call(),
            TokenKind::Begin => {
                let start = parser.advance().span();
                let body = parser.command()?;
                parser.expect(TokenKind::End)?;
                Ok(Command::Begin(CommandBegin {
                    body: Box::new(body),
                    span: parser.span_from(start),
                }))
            }
            TokenKind::Let => {
                let start = parser.advance().span();
                let declaration = parser.declaration()?;
                parser.expect(TokenKind::In)?;
                let body = parser.single_command()?;
                parser.expect(TokenKind::EndLet)?;
                Ok(Command::Let(CommandLet {
                    declaration,
                    body: Box::new(body),
                    span: parser.span_from(start),
                }))
            }
            TokenKind::If => {
                let start = parser.advance().span();
                let condition = parser.expression()?;
                parser.expect(TokenKind::Colon)?;
                let then_branch = parser.single_command()?;
                parser.expect(TokenKind::Colon)?;
                let else_branch = parser.single_command()?;
                parser.expect(TokenKind::EndIf)?;
                Ok(Command::If(CommandIf {
                    condition,
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                    span: parser.span_from(start),
                }))
            }
            TokenKind::While => {
                let start = parser.advance().span();
                let guard = parser.expression()?;
                parser.expect(TokenKind::Do)?;
                let body = parser.single_command()?;
                parser.expect(TokenKind::After)?;
                let after = parser.single_command()?;
                parser.expect(TokenKind::Wend)?;
                Ok(Command::While(CommandWhile {
                    guard,
                    body: Box::new(body),
                    after: Box::new(after),
                    span: parser.span_from(start),
                }))
            }
            _ => Err(parser.expected_construct("a command")),
        })
    }

    /// `identifier ('<-' expression | '[' parameter ']')`
    fn assign_or_call(&mut self) -> Parsed<Command> {
        self.rule("assignment or call", |parser| {
            let identifier = Identifier::from(parser.expect(TokenKind::Identifier)?);
            let start = identifier.span;
            if parser.accept(TokenKind::Becomes).is_some() {
                let expr = parser.expression()?;
                Ok(Command::Assign(CommandAssign {
                    identifier,
                    expr,
                    span: parser.span_from(start),
                }))
            } else if parser.accept(TokenKind::LeftSquareBracket).is_some() {
                let parameter = parser.parameter()?;
                parser.expect(TokenKind::RightSquareBracket)?;
                Ok(Command::Call(CommandCall {
                    identifier,
                    parameter,
                    span: parser.span_from(start),
                }))
            } else {
                Err(parser.unexpected([TokenKind::Becomes, TokenKind::LeftSquareBracket]))
            }
        })
    }
}
