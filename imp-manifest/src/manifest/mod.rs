//! Manifest types and parsing for imp.toml files.

mod file;
mod lower;
mod parse;
mod validate;

pub use file::ImpToml;
use imp_core::writer::FormatOptions;
pub use lower::Design;
pub use parse::{MANIFEST_FILE, parse_manifest};
use serde::Deserialize;
use toml::Spanned;
pub use validate::ParseContext;

/// Root manifest for imp.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output formatting
    #[serde(default)]
    pub format: FormatOptions,

    /// Modules, rendered in declaration order
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
}

impl Manifest {
    pub fn module(&self, name: &str) -> Option<&ModuleSpec> {
        self.modules
            .iter()
            .find(|module| module.name.get_ref() == name)
    }
}

/// One `[[modules]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    pub name: Spanned<String>,

    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

/// What an item declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[serde(rename = "localparam")]
    LocalParam,
    Parameter,
    Comment,
    Banner,
    BlockComment,
    Group,
    Block,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::LocalParam => "localparam",
            ItemKind::Parameter => "parameter",
            ItemKind::Comment => "comment",
            ItemKind::Banner => "banner",
            ItemKind::BlockComment => "block_comment",
            ItemKind::Group => "group",
            ItemKind::Block => "block",
        }
    }

    /// Groups and blocks hold nested items.
    pub fn is_container(&self) -> bool {
        matches!(self, ItemKind::Group | ItemKind::Block)
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, ItemKind::LocalParam | ItemKind::Parameter)
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            ItemKind::Comment | ItemKind::Banner | ItemKind::BlockComment
        )
    }
}

/// One `[[modules.items]]` entry, or a nested `[[...items.items]]` entry.
///
/// Which fields apply depends on `kind`; validation rejects the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    pub kind: Spanned<ItemKind>,

    /// Declared name (declarations, blocks)
    pub name: Option<Spanned<String>>,

    /// Additional names sharing one declaration
    #[serde(default)]
    pub names: Vec<Spanned<String>>,

    /// Data type, e.g. `"int"` or `"logic [7:0]"`
    #[serde(rename = "type")]
    pub ty: Option<Spanned<String>>,

    /// Value of a localparam or default of a parameter
    pub value: Option<Spanned<toml::Value>>,

    /// Comment text
    pub text: Option<String>,

    /// Nested items of a group or block
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

impl ItemSpec {
    pub fn kind(&self) -> ItemKind {
        *self.kind.get_ref()
    }

    /// Every declared name, `name` first.
    pub fn all_names(&self) -> impl Iterator<Item = &Spanned<String>> {
        self.name.iter().chain(&self.names)
    }
}

/// Convert a TOML scalar to the text of a SystemVerilog value.
///
/// Returns `None` for arrays, tables and datetimes.
pub fn toml_value_to_sv(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(if *b { "1'b1" } else { "1'b0" }.to_string()),
        _ => None,
    }
}
