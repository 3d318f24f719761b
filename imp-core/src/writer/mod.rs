//! Rendering pipeline.
//!
//! - [`Tokenizer`] - Dispatches tree nodes to registered handlers
//! - [`Formatter`] - Turns a token stream into indented text
//! - [`Writer`] - Both composed into `render(tree, root)`
//! - [`FormatOptions`] / [`Indent`] - Output configuration

mod formatter;
mod indent;
mod options;
mod tokenizer;
#[allow(clippy::module_inception)]
mod writer;

pub use formatter::{Formatter, TraceEntry};
pub use indent::Indent;
pub use options::FormatOptions;
pub use tokenizer::{
    Handler, Item, Registration, Tokenizer, TokenizerBuilder, Variant, VariantKind,
};
pub use writer::Writer;
