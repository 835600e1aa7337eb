use std::io;

use structopt::StructOpt;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use seriesset::cliopt::CliOpt;
use seriesset::runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let subscriber = FmtSubscriber::builder()
        .with_writer(io::stderr)
        .with_max_level(if opt.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let written = runner::run(&opt, io::stdout())?;
    debug!(written, "done");

    Ok(())
}
