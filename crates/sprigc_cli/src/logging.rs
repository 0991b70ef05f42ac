//! Log output of the `sprigc` binary

use tracing::metadata::LevelFilter;
use tracing::Level;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::writer::{MakeWriterExt, OrElse, WithMaxLevel};
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

/// Installs the global subscriber. Warnings and errors are written to stderr, the rest to stdout.
pub fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(level_split(std::io::stderr, std::io::stdout))
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;
    Ok(())
}

/// Sends events at [Level::WARN] and above to `diagnostics` and everything else to `output`
fn level_split<D, O>(diagnostics: D, output: O) -> OrElse<WithMaxLevel<D>, O>
where
    D: for<'w> MakeWriter<'w> + 'static,
    O: for<'w> MakeWriter<'w> + 'static,
{
    diagnostics.with_max_level(Level::WARN).or_else(output)
}
