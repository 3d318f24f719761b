mod check;
mod completions;
mod render;

use clap::{Parser, Subcommand};
use eyre::Result;

/// Print a manifest diagnostic with its source snippet and exit with status 1.
fn exit_with_report(err: imp_manifest::Error) -> ! {
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(1)
}

/// Exit on manifest errors instead of propagating them, so users see the
/// annotated miette report rather than an eyre chain.
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for imp_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|err| exit_with_report(*err))
    }
}

#[derive(Parser)]
#[command(name = "imp", version, about = "Render SystemVerilog from TOML design manifests")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the modules of a manifest as SystemVerilog
    Render(render::RenderCommand),

    /// Validate a manifest and summarize its modules
    Check(check::CheckCommand),

    /// Print a shell completion script
    Completions(completions::CompletionsCommand),
}
