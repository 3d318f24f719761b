//! Token algebra.
//!
//! - [`Token`] - Immutable output unit (text fragment or layout directive)
//! - [`TokenStream`] - Lazy, flattening sequence of tokens built with `+`
//! - [`separated`], [`comma_separated`], [`semicolon_separated`], [`DelimitedBlock`] -
//!   List combinators

mod combinators;
mod stream;
mod token;

pub use combinators::{DelimitedBlock, comma_separated, semicolon_separated, separated};
pub use stream::TokenStream;
pub use token::{
    Position, Token, TokenKind, block_comment, dedent, end_of_file, identifier, indent, indent_by,
    keyword, line_comment, literal, newline, null, number, sp, space, symbol, type_name,
};
