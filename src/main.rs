mod cli;
mod colorize;
mod config;
mod display;
mod entry;
mod filter;
mod logger;
mod output;
mod runner;
mod sort;

use anyhow::Result;
use config::ListingOptions;
use logger::Logger;
use std::io::Write;

fn main() -> Result<()> {
    logger::init();
    let cli = cli::parse_or_exit();
    let options = ListingOptions::from(cli);
    colorize::enable(!options.plain());

    let mut out = output::open(options.capture)?;
    let mut diagnostics = Logger::stderr();
    runner::run(&options, &mut out, &mut diagnostics)?;
    out.flush()?;
    Ok(())
}
