//! A sprig compilation error

use itertools::Itertools as _;
use sprig_ast_parsing::lexer::LexingError;
use sprig_ast_parsing::parser::SyntaxError;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::AcquireError;
use tokio::task::JoinError;

/// The kind of error
#[derive(Debug, Error)]
pub enum SprigCErrorKind {
    #[error(transparent)]
    Lexing(#[from] LexingError),
    #[error("{} syntax error(s)\n{}", .errors.len(), .errors.iter().join("\n"))]
    Syntax {
        errors: Vec<SyntaxError>,
        /// the text the errors were found in
        source_text: String,
    },
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<SprigCError>),
    #[error("compile task failed: {0}")]
    Join(#[from] JoinError),
    #[error(transparent)]
    Acquire(#[from] AcquireError),
}

/// An error occurred while attempting to compile sprig files
#[derive(Debug, Error)]
pub struct SprigCError {
    kind: SprigCErrorKind,
    path: Option<PathBuf>,
}

impl SprigCError {
    /// Creates a new error that occurred while compiling the file at `path`
    pub fn new(kind: impl Into<SprigCErrorKind>, path: impl Into<Option<PathBuf>>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }

    pub fn kind(&self) -> &SprigCErrorKind {
        &self.kind
    }

    /// The file being compiled, if this error is about a single file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All syntax errors in this error, including those of nested errors
    pub fn syntax_errors(&self) -> Vec<&SyntaxError> {
        match &self.kind {
            SprigCErrorKind::Syntax { errors, .. } => errors.iter().collect(),
            SprigCErrorKind::Multi(errors) => {
                errors.iter().flat_map(SprigCError::syntax_errors).collect()
            }
            _ => vec![],
        }
    }

    /// Renders this error, showing the source around each syntax error
    pub fn render(&self) -> String {
        match &self.kind {
            SprigCErrorKind::Syntax {
                errors,
                source_text,
            } => errors
                .iter()
                .map(|error| match &self.path {
                    Some(path) => format!("{}: {}", path.display(), error.render(source_text)),
                    None => error.render(source_text),
                })
                .join("\n"),
            SprigCErrorKind::Multi(errors) => errors.iter().map(SprigCError::render).join("\n"),
            _ => format!("{self}\n"),
        }
    }
}

impl Display for SprigCError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl<T> From<T> for SprigCError
where
    SprigCErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        Self::new(SprigCErrorKind::from(value), None)
    }
}

impl From<Vec<SprigCError>> for SprigCErrorKind {
    fn from(value: Vec<SprigCError>) -> Self {
        SprigCErrorKind::Multi(value)
    }
}

/// A type alias for general results in sprigc
pub type SprigCResult<T> = Result<T, SprigCError>;
