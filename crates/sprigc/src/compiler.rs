//! Responsible with compiling sprig files

use error::{SprigCError, SprigCErrorKind, SprigCResult};
use itertools::Itertools;
use sprig_ast::program::Program;
use sprig_ast_parsing::lexer::Lexer;
use sprig_ast_parsing::parser::{Diagnostics, SyntacticParser};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error_span, info_span, trace, Instrument};

pub mod error;

/// Which intermediate form of a compiled file to produce
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Emit {
    #[default]
    Nothing,
    /// the token stream, one token per line
    Tokens,
    /// the syntax tree
    Ast,
}

impl FromStr for Emit {
    type Err = ParseEmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokens" => Ok(Emit::Tokens),
            "ast" => Ok(Emit::Ast),
            other => Err(ParseEmitError(other.to_string())),
        }
    }
}

/// An unknown [Emit] name
#[derive(Debug, Error)]
#[error("unknown emit kind {0:?}, expected `tokens` or `ast`")]
pub struct ParseEmitError(String);

/// A file that lexed and parsed without errors
#[derive(Debug)]
pub struct CompiledUnit {
    pub path: PathBuf,
    pub program: Program,
    /// the number of tokens scanned, including the end of text
    pub tokens_len: usize,
    /// the form requested with [SprigCBuilder::emit]
    pub emitted: Option<String>,
}

/// Responsible with compiling sprig files.
///
/// Must be configured using an [SprigCBuilder].
#[derive(Debug, Clone)]
pub struct SprigC {
    max_jobs: usize,
    emit: Emit,
}

impl SprigC {
    /// Creates the default SprigCBuilder
    #[inline]
    pub fn builder() -> SprigCBuilder {
        SprigCBuilder::new()
    }

    /// The most files compiled at once
    pub fn max_jobs(&self) -> usize {
        self.max_jobs
    }

    pub fn emit(&self) -> Emit {
        self.emit
    }

    /// Compile a file at a given path.
    ///
    /// Fails with [SprigCErrorKind::Syntax] listing every syntax error if the file doesn't parse.
    pub fn compile(&self, path: &Path) -> SprigCResult<CompiledUnit> {
        let _span = info_span!("compile", path = ?path).entered();
        let lexer =
            Lexer::read_path(path).map_err(|e| SprigCError::new(e, path.to_path_buf()))?;
        let source_text = lexer.source().to_string();
        let tokens = lexer.produce_all_tokens();
        let tokens_len = tokens.len();
        let token_dump = (self.emit == Emit::Tokens)
            .then(|| tokens.iter().map(|token| format!("{token:?}")).join("\n"));

        let mut diagnostics = Diagnostics::new();
        let program = SyntacticParser::new(tokens, &mut diagnostics).parse_program();
        if !diagnostics.is_empty() {
            debug!("found {} syntax error(s)", diagnostics.len());
            return Err(SprigCError::new(
                SprigCErrorKind::Syntax {
                    errors: diagnostics.into_vec(),
                    source_text,
                },
                path.to_path_buf(),
            ));
        }
        debug!("parsed {tokens_len} tokens");

        let emitted = match self.emit {
            Emit::Nothing => None,
            Emit::Tokens => token_dump,
            Emit::Ast => Some(format!("{program:#?}")),
        };
        Ok(CompiledUnit {
            path: path.to_path_buf(),
            program,
            tokens_len,
            emitted,
        })
    }

    /// Compile many files at once, at most [max_jobs](Self::max_jobs) at a time.
    ///
    /// Units are returned in the order of `paths`. If any file fails, every failure is returned
    /// in a [SprigCErrorKind::Multi].
    pub async fn compile_all(&self, paths: Vec<PathBuf>) -> SprigCResult<Vec<CompiledUnit>> {
        let permits = Arc::new(Semaphore::new(self.max_jobs));
        let mut join_set = JoinSet::new();
        for (index, path) in paths.into_iter().enumerate() {
            let permits = permits.clone();
            let compiler = self.clone();
            let span = error_span!("compile_all", path = ?path);
            join_set.spawn(
                async move {
                    let _permit = permits.acquire_owned().await?;
                    trace!("starting compile job {index}");
                    let span = tracing::Span::current();
                    let unit = tokio::task::spawn_blocking(move || {
                        span.in_scope(|| compiler.compile(&path))
                    })
                    .await??;
                    Ok::<_, SprigCError>((index, unit))
                }
                .instrument(span),
            );
        }

        let mut units = vec![];
        let mut errors = vec![];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(unit)) => units.push(unit),
                Ok(Err(error)) => errors.push(error),
                Err(error) => errors.push(SprigCError::from(error)),
            }
        }
        if !errors.is_empty() {
            return Err(SprigCError::from(errors));
        }
        units.sort_by_key(|(index, _)| *index);
        Ok(units.into_iter().map(|(_, unit)| unit).collect())
    }
}

/// Builder for creating a [SprigC] instance.
#[derive(Debug)]
pub struct SprigCBuilder {
    /// Number of jobs to run at once
    pub jobs: usize,
    pub emit: Emit,
}

impl SprigCBuilder {
    /// Creates an SprigCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of files compiled at once
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Sets which intermediate form each compiled unit carries
    pub fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    /// Builds an [SprigC] instance from this builder
    pub fn build(self) -> Result<SprigC, BuildSprigCError> {
        if self.jobs == 0 {
            return Err(BuildSprigCError::ZeroJobs);
        }
        Ok(SprigC {
            max_jobs: self.jobs,
            emit: self.emit,
        })
    }
}

impl Default for SprigCBuilder {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get(),
            emit: Emit::default(),
        }
    }
}

/// An error occurred while building an [SprigC] instance
#[derive(Debug, Error)]
pub enum BuildSprigCError {
    #[error("Compilation can't occur if no jobs are allowed")]
    ZeroJobs,
}
