#![doc = include_str!("../README.md")]

use crate::spanned::{LineReader, Span};
use std::fmt::{Display, Formatter, Write as _};

pub mod spanned;
pub mod token;

/// An error with a location
#[derive(Debug, Clone, thiserror::Error)]
pub struct SpannedError<E> {
    error: E,
    location: Option<Span>,
}

impl<E> SpannedError<E> {
    pub fn new(error: E, location: impl Into<Option<Span>>) -> Self {
        Self {
            error,
            location: location.into(),
        }
    }

    /// Gets the inner error
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Gets where this error occurred, if known
    pub fn location(&self) -> Option<Span> {
        self.location
    }
}

impl<E: Display> SpannedError<E> {
    /// Renders this error along with the lines of `src` surrounding its location.
    ///
    /// `src` must be the text the location was taken from.
    pub fn render(&self, src: &str) -> String {
        let mut out = String::new();
        let _ = self.render_into(&mut out, src);
        out
    }

    fn render_into(&self, f: &mut String, src: &str) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        let Some(location) = &self.location else {
            return Ok(());
        };
        let (lines, base_line) = LineReader::new(2, 2).lines(src, location);
        writeln!(f, "  -> {location}")?;
        let max_line = lines.iter().map(|line| line.line).max().unwrap_or(1).max(1);
        let width = max_line.ilog10() as usize + 1;
        for line in &lines {
            writeln!(f, "{:width$} | {}", line.line, line.src)?;
            if line.line == base_line {
                if location.len() > 0 {
                    writeln!(
                        f,
                        "{}{}{}",
                        " ".repeat(width + 3),
                        " ".repeat(line.col),
                        "~".repeat(location.len())
                    )?;
                } else {
                    writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(line.col))?;
                }
            }
        }
        Ok(())
    }
}

impl<E: Display> Display for SpannedError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} at {location}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}
