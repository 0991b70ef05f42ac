//! Destinations for syntax errors found while parsing

use crate::parser::error::SyntaxError;
use tracing::error;

/// Receives every syntax error a parser reports, in the order they are found
pub trait DiagnosticSink {
    fn report(&mut self, error: SyntaxError);
}

impl DiagnosticSink for Vec<SyntaxError> {
    fn report(&mut self, error: SyntaxError) {
        self.push(error);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, error: SyntaxError) {
        (**self).report(error)
    }
}

/// Collects reported syntax errors
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<SyntaxError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of errors reported
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntaxError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<SyntaxError> {
        self.errors
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }
}

impl IntoIterator for Diagnostics {
    type Item = SyntaxError;
    type IntoIter = std::vec::IntoIter<SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Emits every reported error as a `tracing` error event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, error: SyntaxError) {
        error!("{error}");
    }
}
