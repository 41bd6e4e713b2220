//! nanoprov - drive the nanoid identifier resources from the shell.
//!
//! Stands in for the orchestrating caller: every lifecycle operation takes
//! JSON documents and prints JSON state, so plans and applies can be
//! scripted or inspected by hand.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod input;
mod logging;
mod output;

use commands::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    logging::init(&config.log_level, config.log_format);

    let format = cli.format().unwrap_or(config.output);
    if let Err(e) = cli.run(config) {
        error::print_error(&e, format);
        std::process::exit(1);
    }

    Ok(())
}
