//! Recursive descent parser that builds the AST from a token list

use crate::lexer::Lexer;
use sprig_ast::prelude::*;
use sprig_tokens::spanned::{Span, Spanned};
use sprig_tokens::token::{Token, TokenKind};
use std::fmt::{Debug, Formatter};
use tracing::{debug, trace};

mod commands;
mod declarations;
pub mod diagnostics;
pub mod error;
mod expr;

pub use diagnostics::{DiagnosticSink, Diagnostics, TracingSink};
pub use error::{ErrorKind, Found, SyntaxError};

/// The result of a grammar rule. The error has already been reported when this is `Err`.
type Parsed<T> = Result<T, ErrorNode>;

/// The most grammar rules that may be open at once. Deeper input is reported instead of parsed
/// so that nesting can't exhaust the thread's stack.
pub const MAX_NESTING: usize = 128;

/// Creates the syntax tree from a token list.
///
/// Holds a single lookahead token. Errors are reported to a [DiagnosticSink] and replaced by
/// error nodes in the tree, so parsing always produces a tree.
///
/// # Examples
/// ```
/// # use sprig_ast_parsing::lexer::Lexer;
/// # use sprig_ast_parsing::parser::{SyntacticParser, SyntaxError};
/// let mut errors: Vec<SyntaxError> = vec![];
/// let lexer = Lexer::new("declare global dec x as const <- 1 do x <- x + 1");
/// let program = SyntacticParser::from_lexer(lexer, &mut errors).parse_program();
/// assert!(errors.is_empty());
/// assert_eq!(program.to_string(), "declare global dec x as const <- 1 do x <- x + 1");
/// ```
pub struct SyntacticParser<'s> {
    tokens: Vec<Token>,
    cursor: usize,
    sink: &'s mut dyn DiagnosticSink,
    non_terminals: Vec<&'static str>,
    last_span: Option<Span>,
}

impl<'s> SyntacticParser<'s> {
    /// Creates a new parser over a list of tokens.
    ///
    /// An [TokenKind::EndOfText] token is added if the list doesn't end with one.
    pub fn new(mut tokens: Vec<Token>, sink: &'s mut dyn DiagnosticSink) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::EndOfText)) {
            let end = tokens.last().map_or(Span::new(0, 0, 1, 1), |t| {
                let span = t.span();
                Span::new(
                    span.offset() + span.len(),
                    0,
                    span.line(),
                    span.column() + source_width(t),
                )
            });
            tokens.push(Token::new(end, TokenKind::EndOfText, ""));
        }
        Self {
            tokens,
            cursor: 0,
            sink,
            non_terminals: vec![],
            last_span: None,
        }
    }

    /// Runs the lexer to completion and creates a parser over its tokens
    pub fn from_lexer(lexer: Lexer, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self::new(lexer.produce_all_tokens(), sink)
    }

    /// Parses a complete program.
    ///
    /// A failed declaration section or command section is kept as an error node, and parsing
    /// carries on from whatever token is current.
    pub fn parse_program(&mut self) -> Program {
        trace!("starting parsing program");
        self.non_terminals.push("program");
        let start = self.current().span();

        let declaration = self
            .expect(TokenKind::Declare)
            .and_then(|_| self.expect(TokenKind::Global))
            .and_then(|_| self.declaration())
            .unwrap_or_else(Declaration::from);
        let command = self
            .expect(TokenKind::Do)
            .and_then(|_| self.command())
            .unwrap_or_else(Command::from);
        if !command.is_error() && !self.current().is(TokenKind::EndOfText) {
            let _ = self.unexpected([TokenKind::EndOfText]);
        }

        self.non_terminals.pop();
        trace!("after parsing program");
        Program::new(declaration, command, self.span_from(start))
    }

    /// Parses a declaration, or a sequence of declarations
    pub fn parse_declaration(&mut self) -> Declaration {
        self.declaration().unwrap_or_else(Declaration::from)
    }

    /// Parses a command, or a sequence of commands
    pub fn parse_command(&mut self) -> Command {
        self.command().unwrap_or_else(Command::from)
    }

    /// Parses an expression
    pub fn parse_expr(&mut self) -> Expr {
        self.expression().unwrap_or_else(Expr::from)
    }

    /// The lookahead token
    fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Checks the kind of the lookahead token
    fn at(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    /// Consumes the lookahead token. At the end of text this leaves the cursor in place.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        trace!("consumed {token:?}");
        self.last_span = Some(token.span());
        token
    }

    /// Consumes the lookahead token only if it is of the given kind.
    ///
    /// Never reports anything, a mismatch just leaves the cursor where it is. Use
    /// [expect](Self::expect) when the token is required.
    fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes a token of the given kind, reporting an error if the lookahead is anything else
    fn expect(&mut self, kind: TokenKind) -> Parsed<Token> {
        match self.accept(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected([kind])),
        }
    }

    /// Reports that one of `expected` should have been found at the lookahead
    fn unexpected(&mut self, expected: impl IntoIterator<Item = TokenKind>) -> ErrorNode {
        let kind = ErrorKind::expected_token(expected, self.current());
        self.report(kind)
    }

    /// Reports that a construct should have started at the lookahead
    fn expected_construct(&mut self, construct: &'static str) -> ErrorNode {
        let kind = ErrorKind::expected_construct(construct, self.current());
        self.report(kind)
    }

    fn report(&mut self, kind: ErrorKind) -> ErrorNode {
        let span = self.current().span();
        let error = SyntaxError::new(kind, span, self.non_terminals.clone());
        debug!("{error}");
        self.sink.report(error);
        ErrorNode::new(span)
    }

    /// Runs a grammar rule, tracking it on the non-terminal stack
    fn rule<T>(
        &mut self,
        non_terminal: &'static str,
        f: impl FnOnce(&mut Self) -> Parsed<T>,
    ) -> Parsed<T> {
        if self.non_terminals.len() >= MAX_NESTING {
            let kind = ErrorKind::NestingTooDeep {
                limit: MAX_NESTING,
                found: self.current().into(),
            };
            return Err(self.report(kind));
        }
        trace!("starting parsing {non_terminal} at {:?}", self.current());
        self.non_terminals.push(non_terminal);
        let result = f(self);
        self.non_terminals.pop();
        trace!(
            "after parsing {non_terminal} ({})",
            if result.is_ok() { "ok" } else { "failed" }
        );
        result
    }

    /// The span from `start` up to the end of the last consumed token
    fn span_from(&self, start: Span) -> Span {
        match self.last_span {
            Some(last) if last.offset() >= start.offset() => start.join(last),
            _ => start,
        }
    }
}

/// The number of characters a token took up in its source
fn source_width(token: &Token) -> usize {
    let width = token.spelling().chars().count();
    match token.kind() {
        TokenKind::CharLiteral => width + 2,
        _ => width,
    }
}

impl Debug for SyntacticParser<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntacticParser")
            .field("current", self.current())
            .field("non_terminals", &self.non_terminals)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use test_log::test;

    pub fn parse(src: &str) -> (Program, Vec<SyntaxError>) {
        let mut errors: Vec<SyntaxError> = vec![];
        let program = SyntacticParser::from_lexer(Lexer::new(src), &mut errors).parse_program();
        (program, errors)
    }

    fn parse_expr(src: &str) -> Expr {
        let mut errors: Vec<SyntaxError> = vec![];
        let expr = SyntacticParser::from_lexer(Lexer::new(src), &mut errors).parse_expr();
        assert!(errors.is_empty(), "{errors:#?}");
        expr
    }

    fn parse_ok(src: &str) -> Program {
        let (program, errors) = parse(src);
        assert!(errors.is_empty(), "{src:?} had errors: {errors:#?}");
        program
    }

    #[test]
    fn test_single_items_are_bare() {
        let program = parse_ok("declare global dec x as const <- 1 do x <- 2");
        assert!(matches!(program.declaration, Declaration::Const(_)));
        let Command::Assign(assign) = &program.command else {
            panic!("expected assignment but got {:?}", program.command)
        };
        assert_eq!(assign.identifier.spelling, "x");
        assert!(matches!(&assign.expr, Expr::IntegerLiteral(i) if i.spelling == "2"));
    }

    #[test]
    fn test_sequences_keep_source_order() {
        let program = parse_ok(
            "declare global dec x as const <- 1; dec y as var : Integer <- 'a' do x <- 1; y <- 2; put[void]",
        );
        let Declaration::Sequential(declarations) = &program.declaration else {
            panic!("expected sequential declaration")
        };
        assert_eq!(declarations.declarations.len(), 2);
        let Declaration::Var(var) = &declarations.declarations[1] else {
            panic!("expected var declaration")
        };
        assert_eq!(var.type_denoter.identifier.spelling, "Integer");
        assert!(matches!(&var.expr, Expr::CharacterLiteral(c) if c.value() == Some('a')));

        let Command::Sequential(commands) = &program.command else {
            panic!("expected sequential command")
        };
        assert_eq!(commands.commands.len(), 3);
        assert!(matches!(&commands.commands[2], Command::Call(c) if matches!(c.parameter, Parameter::Void(_))));
    }

    #[test]
    fn test_if_branches_are_independent() {
        let program = parse_ok("declare global dec x as var : Int <- 0 do if 1 : x<-1 : x<-2 endif");
        let Command::If(if_command) = &program.command else {
            panic!("expected if command")
        };
        let value = |command: &Command| match command {
            Command::Assign(assign) => assign.expr.to_string(),
            other => panic!("expected assignment but got {other:?}"),
        };
        assert_eq!(value(&if_command.then_branch), "1");
        assert_eq!(value(&if_command.else_branch), "2");
    }

    #[test]
    fn test_while_has_three_children() {
        let program = parse_ok(
            "declare global dec x as var : Int <- 0 do while x < 10 do x <- x + 1 after put[var x] wend",
        );
        let Command::While(while_command) = &program.command else {
            panic!("expected while command")
        };
        assert_eq!(while_command.guard.to_string(), "x < 10");
        assert!(matches!(*while_command.body, Command::Assign(_)));
        let Command::Call(call) = &*while_command.after else {
            panic!("expected call")
        };
        assert!(matches!(&call.parameter, Parameter::Var(v) if v.identifier.spelling == "x"));
    }

    #[test]
    fn test_let_and_begin() {
        let program = parse_ok(
            "declare global dec x as const <- 1 do let dec y as const <- 2 in begin x <- y; y <- x end endlet",
        );
        let Command::Let(let_command) = &program.command else {
            panic!("expected let command")
        };
        assert!(matches!(let_command.declaration, Declaration::Const(_)));
        let Command::Begin(begin) = &*let_command.body else {
            panic!("expected begin command")
        };
        assert!(matches!(&*begin.body, Command::Sequential(s) if s.commands.len() == 2));
    }

    #[test]
    fn test_operators_fold_left() {
        let Expr::Binary(binary) = parse_expr("a + b * c") else {
            panic!("expected binary expression")
        };
        assert_eq!(binary.operator.spelling, "*");
        assert!(matches!(&*binary.right, Expr::Identifier(i) if i.identifier.spelling == "c"));
        let Expr::Binary(left) = &*binary.left else {
            panic!("expected binary expression on the left")
        };
        assert_eq!(left.operator.spelling, "+");
    }

    #[test]
    fn test_parentheses_and_unary() {
        let Expr::Unary(unary) = parse_expr("- (a + b)") else {
            panic!("expected unary expression")
        };
        assert_eq!(unary.operator.spelling, "-");
        assert!(matches!(*unary.operand, Expr::Binary(_)));

        let Expr::Binary(binary) = parse_expr("a = (b \\ c)") else {
            panic!("expected binary expression")
        };
        assert!(matches!(*binary.right, Expr::Binary(_)));
    }

    #[test]
    fn test_call_in_expression() {
        let Expr::Identifier(call) = parse_expr("f[const 1 + 2]") else {
            panic!("expected identifier expression")
        };
        assert_eq!(call.identifier.spelling, "f");
        assert!(matches!(call.call.as_deref(), Some(Parameter::Const(p)) if p.expr.to_string() == "1 + 2"));
        assert_eq!(call.span, Span::new(0, 14, 1, 1));
    }

    #[test]
    fn test_missing_initializer_recovers_at_do() {
        let (program, errors) = parse("declare global dec x as do x <- 1");
        assert_eq!(errors.len(), 1, "{errors:#?}");
        assert_eq!(
            errors[0].error_kind(),
            &ErrorKind::expected_token(
                [TokenKind::Const, TokenKind::Var],
                &Token::new(Span::new(24, 2, 1, 25), TokenKind::Do, "do")
            )
        );
        let Declaration::Error(error) = program.declaration else {
            panic!("expected declaration error")
        };
        assert_eq!(error.span.offset(), 24);
        assert!(matches!(program.command, Command::Assign(_)));
    }

    #[test]
    fn test_errors_record_non_terminals() {
        let (program, errors) = parse("declare global dec x as const <- 1 do x");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].non_terminal_stack,
            ["program", "command", "single command", "assignment or call"]
        );
        assert!(program.command.is_error());
        assert!(!program.declaration.is_error());
    }

    #[test]
    fn test_bad_command_is_positioned_at_offending_token() {
        let (program, errors) = parse("declare global dec x as const <- 1 do ; x <- 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.command.span().offset(), 38);
        assert_eq!(errors[0].location(), Some(program.command.span()));
        assert!(matches!(
            errors[0].error_kind(),
            ErrorKind::ExpectedConstruct { expected: "a command", .. }
        ));
    }

    #[test]
    fn test_trailing_tokens_are_reported() {
        let (program, errors) = parse("declare global dec x as const <- 1 do x <- 1 endif");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0].error_kind(),
            ErrorKind::ExpectedToken { expected, .. } if expected == &[TokenKind::EndOfText]
        ));
        assert!(!program.has_errors());
    }

    #[test]
    fn test_missing_declare() {
        let (program, errors) = parse("do x <- 1");
        assert_eq!(errors.len(), 1);
        assert!(program.declaration.is_error());
        assert!(matches!(program.command, Command::Assign(_)));
    }

    #[test]
    fn test_malformed_input_terminates() {
        for src in [
            "",
            "@@@",
            "declare",
            "declare global",
            "declare global do",
            "declare global dec x as const <- do begin",
            "declare global dec $ as var : 1 <- 'ab' do ((((",
            "declare global dec x as const <- 1 do while while while",
            "declare global dec x as const <- 1 do if x : begin : y <- 1",
            "declare global dec x as const <- f[var 1] do x[const",
            "endlet endif wend end",
        ] {
            let (program, errors) = parse(src);
            assert!(!errors.is_empty(), "{src:?} should have errors");
            assert!(program.has_errors(), "{src:?} should have an error node");
            for error in &errors {
                assert!(error.location().is_some());
            }
        }
    }

    #[test]
    fn test_empty_token_list_gets_end_of_text() {
        let mut errors: Vec<SyntaxError> = vec![];
        let command = SyntacticParser::new(vec![], &mut errors).parse_command();
        assert!(command.is_error());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_kind().found().kind, TokenKind::EndOfText);
    }

    #[test]
    fn test_printing_reparses_to_the_same_text() {
        let src = r"
            declare global
                dec max as const <- 5,000;
                dec c as var : Char <- '?';
                dec n as var : Integer <- - (1 + 2) * 3
            do
                ! count up
                while n < max do n <- n + f[const n \ 2] after put[var n] wend;
                if c = 'a' : begin skip[void] end : let dec t as const <- c in c <- t endlet endif
        ";
        let printed = parse_ok(src).to_string();
        let reprinted = parse_ok(&printed).to_string();
        assert_eq!(printed, reprinted);
    }

    #[test]
    fn test_program_span_covers_all_tokens() {
        let src = "  declare global dec x as const <- 1 do x <- 2  ";
        let program = parse_ok(src);
        assert_eq!(program.span, Span::new(2, 44, 1, 3));
    }

    #[test]
    fn test_synthesized_end_of_text_follows_last_token() {
        let mut tokens = Lexer::new("x <- 'a'").produce_all_tokens();
        let end_of_text = tokens.pop().expect("lexer always ends with end of text");
        let mut errors: Vec<SyntaxError> = vec![];
        let parser = SyntacticParser::new(tokens, &mut errors);
        let synthesized = parser.tokens.last().expect("end of text was added");
        assert!(synthesized.is(TokenKind::EndOfText));
        assert_eq!(synthesized.span(), end_of_text.span());
    }

    #[test]
    fn test_deep_parentheses_are_reported() {
        let src = format!(
            "declare global dec x as const <- {} 1 do x <- 1",
            "(".repeat(5_000)
        );
        let (program, errors) = parse(&src);
        assert!(program.declaration.is_error());
        assert!(matches!(
            errors[0].error_kind(),
            ErrorKind::NestingTooDeep { limit: MAX_NESTING, .. }
        ));
        assert_eq!(errors[0].non_terminal_stack.len(), MAX_NESTING);
    }

    #[test]
    fn test_deep_unary_operators_are_reported() {
        let src = format!("declare global dec x as const <- 1 do x <- {} x", "- ".repeat(5_000));
        let (program, errors) = parse(&src);
        assert!(program.command.is_error());
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error_kind(),
            ErrorKind::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn test_deep_begin_blocks_are_reported() {
        let src = format!(
            "declare global dec x as const <- 1 do {} x <- 1 {}",
            "begin ".repeat(3_000),
            "end ".repeat(3_000)
        );
        let (program, errors) = parse(&src);
        assert!(program.command.is_error());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_moderate_nesting_still_parses() {
        let src = format!(
            "declare global dec x as const <- {}1{} do x <- 1",
            "(".repeat(20),
            ")".repeat(20)
        );
        parse_ok(&src);
    }

    #[test]
    fn test_skip_reparses_as_text() {
        let printed = parse_ok("declare global dec x as const <- 1 do x <- 1; skip[void]").to_string();
        assert_eq!(printed, "declare global dec x as const <- 1 do x <- 1; skip[void]");
    }
}
