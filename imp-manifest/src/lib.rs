//! The `imp.toml` design manifest.
//!
//! A manifest lists modules and their items. [`parse_manifest`] parses and
//! validates it; [`Manifest::lower`] turns it into a SystemVerilog construct
//! tree ready for rendering.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    Design, ImpToml, ItemKind, ItemSpec, MANIFEST_FILE, Manifest, ModuleSpec, ParseContext,
    parse_manifest, toml_value_to_sv,
};
