use crate::args::Args;
use clap::Parser;
use eyre::eyre;
use logging::init_logging;
use owo_colors::{OwoColorize, Stream};
use sprigc::error::SprigCError;
use sprigc::SprigC;
use tracing::{debug, info, trace};

mod args;
mod logging;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting sprigc with args: {args:?}");
    debug!("sprigc version: {}", env!("CARGO_PKG_VERSION"));

    let mut builder = SprigC::builder();
    if let Some(jobs) = args.jobs {
        builder = builder.jobs(jobs);
    }
    if let Some(emit) = args.emit {
        builder = builder.emit(emit);
    }
    let sprig_c = builder.build()?;

    debug!("paths to compile: {:#?}", args.files);
    match sprig_c.compile_all(args.files.clone()).await {
        Ok(units) => {
            for unit in units {
                info!("{} is well formed", unit.path.display());
                if let Some(emitted) = &unit.emitted {
                    let header = format!("== {} ==", unit.path.display());
                    println!(
                        "{}",
                        header.if_supports_color(Stream::Stdout, |text| text.bold())
                    );
                    println!("{emitted}");
                }
            }
            Ok(())
        }
        Err(error) => {
            print_error(&error);
            Err(eyre!(
                "could not compile, found {} syntax error(s)",
                error.syntax_errors().len()
            ))
        }
    }
}

/// Prints an error with its source snippets to stderr
fn print_error(error: &SprigCError) {
    for line in error.render().lines() {
        if line.contains("syntax error:") {
            eprintln!(
                "{}",
                line.if_supports_color(Stream::Stderr, |text| text.red())
            );
        } else if line.trim_start().starts_with('~') || line.trim_end().ends_with('^') {
            eprintln!(
                "{}",
                line.if_supports_color(Stream::Stderr, |text| text.yellow())
            );
        } else {
            eprintln!("{line}");
        }
    }
}
