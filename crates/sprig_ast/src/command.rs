//! Commands

use crate::declaration::Declaration;
use crate::expr::Expr;
use crate::parameter::Parameter;
use crate::terminal::Identifier;
use crate::ErrorNode;
use itertools::Itertools;
use sprig_tokens::spanned::{Span, Spanned};
use std::fmt::{Display, Formatter};

/// A command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Assign(CommandAssign),
    Call(CommandCall),
    Begin(CommandBegin),
    /// Does nothing. No source form produces this, it exists for later passes.
    Skip(Span),
    While(CommandWhile),
    If(CommandIf),
    Let(CommandLet),
    Sequential(CommandSequential),
    Error(ErrorNode),
}

impl Command {
    /// Combines commands written in order.
    ///
    /// A lone command is returned as is, otherwise all are wrapped in a [Command::Sequential].
    pub fn sequence(first: Command, rest: impl IntoIterator<Item = Command>) -> Self {
        let mut commands = vec![first];
        commands.extend(rest);
        if commands.len() == 1 {
            commands.remove(0)
        } else {
            Command::Sequential(CommandSequential::new(commands))
        }
    }

    /// Checks whether this command is an error placeholder
    pub fn is_error(&self) -> bool {
        matches!(self, Command::Error(_))
    }
}

impl Spanned for Command {
    fn span(&self) -> Span {
        match self {
            Command::Assign(c) => c.span,
            Command::Call(c) => c.span,
            Command::Begin(c) => c.span,
            Command::Skip(span) => *span,
            Command::While(c) => c.span,
            Command::If(c) => c.span,
            Command::Let(c) => c.span,
            Command::Sequential(c) => c.span,
            Command::Error(e) => e.span(),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Assign(c) => write!(f, "{} <- {}", c.identifier, c.expr),
            Command::Call(c) => write!(f, "{}[{}]", c.identifier, c.parameter),
            Command::Begin(c) => write!(f, "begin {} end", c.body),
            // no syntax of its own, printed as a call that does nothing
            Command::Skip(_) => write!(f, "skip[void]"),
            Command::While(c) => write!(
                f,
                "while {} do {} after {} wend",
                c.guard, c.body, c.after
            ),
            Command::If(c) => write!(
                f,
                "if {} : {} : {} endif",
                c.condition, c.then_branch, c.else_branch
            ),
            Command::Let(c) => write!(f, "let {} in {} endlet", c.declaration, c.body),
            Command::Sequential(c) => write!(f, "{}", c.commands.iter().join("; ")),
            Command::Error(e) => e.fmt(f),
        }
    }
}

impl From<ErrorNode> for Command {
    fn from(value: ErrorNode) -> Self {
        Command::Error(value)
    }
}

/// `x <- expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAssign {
    pub identifier: Identifier,
    pub expr: Expr,
    pub span: Span,
}

/// `proc[parameter]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub identifier: Identifier,
    pub parameter: Parameter,
    pub span: Span,
}

/// `begin command end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBegin {
    pub body: Box<Command>,
    pub span: Span,
}

/// `while guard do body after after wend`
///
/// `body` runs while `guard` holds, then `after` runs once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWhile {
    pub guard: Expr,
    pub body: Box<Command>,
    pub after: Box<Command>,
    pub span: Span,
}

/// `if condition : then_branch : else_branch endif`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandIf {
    pub condition: Expr,
    pub then_branch: Box<Command>,
    pub else_branch: Box<Command>,
    pub span: Span,
}

/// `let declaration in body endlet`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLet {
    pub declaration: Declaration,
    pub body: Box<Command>,
    pub span: Span,
}

/// Two or more commands, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSequential {
    pub commands: Vec<Command>,
    pub span: Span,
}

impl CommandSequential {
    fn new(commands: Vec<Command>) -> Self {
        let span = commands
            .iter()
            .map(Spanned::span)
            .reduce(|a, b| a.join(b))
            .unwrap_or_default();
        Self { commands, span }
    }
}
