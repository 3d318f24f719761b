use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use imp_manifest::{ImpToml, ItemSpec, MANIFEST_FILE};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to imp.toml (defaults to ./imp.toml)
    #[arg(short, long, default_value = MANIFEST_FILE)]
    pub config: PathBuf,
}

#[derive(Default)]
struct ItemCounts {
    declarations: usize,
    comments: usize,
    scopes: usize,
}

impl ItemCounts {
    fn add(&mut self, items: &[ItemSpec]) {
        for item in items {
            let kind = item.kind();
            if kind.is_declaration() {
                self.declarations += item.all_names().count();
            } else if kind.is_comment() {
                self.comments += 1;
            } else {
                self.scopes += 1;
                self.add(&item.items);
            }
        }
    }
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let imp_toml = ImpToml::open(&self.config).unwrap_or_exit();
        // Lowering catches name clashes the manifest schema cannot see.
        imp_toml.lower().unwrap_or_exit();

        let manifest = imp_toml.manifest();
        println!("✓ {} is valid\n", self.config.display());
        println!("  indent: {}", manifest.format.indent);

        let count = manifest.modules.len();
        println!("\n  {} module{}:", count, plural(count));
        for module in &manifest.modules {
            let mut counts = ItemCounts::default();
            counts.add(&module.items);
            println!(
                "    {} ({} declaration{}, {} comment{}, {} scope{})",
                module.name.get_ref(),
                counts.declarations,
                plural(counts.declarations),
                counts.comments,
                plural(counts.comments),
                counts.scopes,
                plural(counts.scopes),
            );
        }

        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
