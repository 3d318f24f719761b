//! `imp`: render SystemVerilog from an imp.toml design manifest.

mod commands;

use clap::Parser;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    commands::Cli::parse().run()
}
