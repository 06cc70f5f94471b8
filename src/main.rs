//! fuzzer CLI: enumerate web paths from a wordlist.

use anyhow::Result;
use clap::Parser;
use fuzzer::engine::arg_parser::Cli;
use fuzzer::engine::handle_run;

fn main() -> Result<()> {
    let cli = Cli::parse();
    handle_run(&cli)?;
    Ok(())
}
