//! the args for running sprigc

use sprig_cli_common::LoggingArgs;
use sprigc::Emit;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Checks that sprig source files lex and parse")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Specify which source files to compile
    #[clap(required = true, value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
    /// Print the tokens or the syntax tree of every file
    #[clap(long, value_name = "tokens|ast")]
    pub emit: Option<Emit>,
    /// The most files to compile at once. Defaults to the number of cpus.
    #[clap(short = 'j', long, env = "SPRIGC_JOBS")]
    pub jobs: Option<usize>,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}
