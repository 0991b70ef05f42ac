#![doc = include_str!("../README.md")]

use crate::lexer::{Lexer, LexingError};
use crate::parser::{DiagnosticSink, SyntacticParser};
use sprig_ast::program::Program;
use std::path::Path;
use tracing::debug;

pub mod lexer;
pub mod parser;

/// Parses source text into a program, reporting syntax errors to `sink`
pub fn parse_str(src: &str, sink: &mut dyn DiagnosticSink) -> Program {
    SyntacticParser::from_lexer(Lexer::new(src), sink).parse_program()
}

/// Parses the file at a path into a program, reporting syntax errors to `sink`.
///
/// Only fails if the file can't be read as UTF-8 text.
pub fn parse_file(path: &Path, sink: &mut dyn DiagnosticSink) -> Result<Program, LexingError> {
    debug!("parsing {path:?}");
    let lexer = Lexer::read_path(path)?;
    Ok(SyntacticParser::from_lexer(lexer, sink).parse_program())
}
