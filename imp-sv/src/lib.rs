//! SystemVerilog dialect for imp.
//!
//! [`models`] holds the construct set and the builder API used to assemble
//! modules; [`writers`] holds one tokenizer per construct and the
//! [`SystemVerilogWriter`] that renders a tree to source text.

pub mod models;
pub mod writers;

pub use models::{Construct, ConstructKind, DataType, DataTypeError, ItemBuilder, module};
pub use writers::{SystemVerilogWriter, default_handlers, default_tokenizer};
