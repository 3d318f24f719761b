use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result, bail};
use imp_core::writer::Indent;
use imp_manifest::{ImpToml, MANIFEST_FILE};
use imp_sv::SystemVerilogWriter;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct RenderCommand {
    /// Path to imp.toml (defaults to ./imp.toml)
    #[arg(short, long, default_value = MANIFEST_FILE)]
    pub config: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render only the named module
    #[arg(short, long)]
    pub module: Option<String>,

    /// Override the manifest indentation: "tab", a width, or a literal prefix
    #[arg(long)]
    pub indent: Option<Indent>,

    /// Print every processed token to stderr as a JSON line
    #[arg(long)]
    pub trace: bool,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let imp_toml = ImpToml::open(&self.config).unwrap_or_exit();
        let design = imp_toml.lower().unwrap_or_exit();

        let mut options = imp_toml.manifest().format.clone();
        if let Some(indent) = &self.indent {
            options = options.with_indent(indent.clone());
        }
        if self.trace {
            options = options.with_trace(true);
        }

        let roots = match &self.module {
            Some(name) => match design.module(name) {
                Some(root) => vec![root],
                None => bail!("no module named '{}' in {}", name, self.config.display()),
            },
            None => design.modules.clone(),
        };

        let mut writer =
            SystemVerilogWriter::with_options(&options).wrap_err("Failed to set up writer")?;
        let mut trace = Vec::new();
        let mut output = design
            .render_modules(&mut writer, &roots, |writer| {
                trace.extend_from_slice(writer.trace())
            })
            .wrap_err("Failed to render module")?;
        output.push('\n');

        for entry in &trace {
            eprintln!("{}", serde_json::to_string(entry)?);
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, output)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                println!("Rendered: {}", path.display());
            }
            None => print!("{}", output),
        }

        Ok(())
    }
}
