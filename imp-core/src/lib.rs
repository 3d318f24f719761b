//! Model, token and formatting pipeline for imp.
//!
//! A design is built as a [`model::Tree`] of components, converted into a lazy
//! [`tokens::TokenStream`] by a [`writer::Tokenizer`] holding one handler per
//! node variant, and laid out as text by a [`writer::Formatter`].
//! Target dialects only provide a variant type and a handler table.

pub mod model;
pub mod tokens;
pub mod writer;

mod error;

pub use error::{Error, Result};
