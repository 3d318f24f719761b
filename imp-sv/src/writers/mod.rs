//! SystemVerilog tokenizers and writer.

mod comments;
mod datatypes;
mod modules;
mod parameters;

pub use comments::{banner_tokenizer, block_comment_tokenizer, comment_tokenizer};
pub use datatypes::{integer_atom_tokenizer, integer_vector_tokenizer};
use imp_core::{
    Result,
    model::{NodeId, Tree},
    writer::{FormatOptions, Formatter, Tokenizer, TokenizerBuilder, TraceEntry, Writer},
};

pub use modules::{module_tokenizer, transparent_tokenizer};
pub use parameters::{localparam_tokenizer, parameter_tokenizer};

use crate::models::{Construct, ConstructKind};

/// The SystemVerilog handler table before resolution.
pub fn default_handlers() -> TokenizerBuilder<Construct> {
    TokenizerBuilder::new()
        .register(ConstructKind::Module, "module", module_tokenizer)
        .register(ConstructKind::Group, "group", transparent_tokenizer)
        .register(ConstructKind::Block, "block", transparent_tokenizer)
        .register(ConstructKind::Banner, "banner", banner_tokenizer)
        .register(
            ConstructKind::BlockComment,
            "block_comment",
            block_comment_tokenizer,
        )
        .register(ConstructKind::Comment, "comment", comment_tokenizer)
        .register(
            ConstructKind::IntegerAtom,
            "integer_atom",
            integer_atom_tokenizer,
        )
        .register(
            ConstructKind::IntegerVector,
            "integer_vector",
            integer_vector_tokenizer,
        )
        .register(ConstructKind::LocalParam, "localparam", localparam_tokenizer)
        .register(ConstructKind::Parameter, "parameter", parameter_tokenizer)
}

pub fn default_tokenizer() -> Result<Tokenizer<Construct>> {
    default_handlers().build()
}

/// Renders SystemVerilog constructs to text.
///
/// # Example
///
/// ```
/// use imp_core::model::Tree;
/// use imp_sv::{SystemVerilogWriter, models::module};
///
/// let mut tree = Tree::new();
/// let root = module(&mut tree, "example");
///
/// let mut writer = SystemVerilogWriter::new()?;
/// assert_eq!(writer.render(&tree, root)?, "module example(\n);\nendmodule");
/// # Ok::<(), imp_core::Error>(())
/// ```
pub struct SystemVerilogWriter {
    writer: Writer<Construct>,
}

impl SystemVerilogWriter {
    pub fn new() -> Result<Self> {
        Self::with_options(&FormatOptions::default())
    }

    pub fn with_options(options: &FormatOptions) -> Result<Self> {
        Ok(Self::with_tokenizer(default_tokenizer()?, options))
    }

    /// Use a custom handler table.
    pub fn with_tokenizer(tokenizer: Tokenizer<Construct>, options: &FormatOptions) -> Self {
        Self {
            writer: Writer::new(tokenizer, Formatter::with_options(options)),
        }
    }

    pub fn render(&mut self, tree: &Tree<Construct>, root: NodeId) -> Result<String> {
        self.writer.render(tree, root)
    }

    /// Trace of the last render, empty unless enabled in the options.
    pub fn trace(&self) -> &[TraceEntry] {
        self.writer.formatter().trace()
    }

    pub fn tokenizer(&self) -> &Tokenizer<Construct> {
        self.writer.tokenizer()
    }
}
