//! Data type tokenizers.

use imp_core::{
    Error, Result,
    model::NodeRef,
    tokens::{TokenStream, keyword, number, sp, symbol, type_name},
    writer::Tokenizer,
};

use crate::models::{Construct, DataType};

fn signing(dtype: &DataType) -> TokenStream<'static> {
    match dtype.signing_keyword() {
        Some(word) => sp() + keyword(word),
        None => TokenStream::empty(),
    }
}

/// `int`, `int unsigned`, `time signed`
pub fn integer_atom_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    _: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let Construct::DataType(dtype @ DataType::IntegerAtom { .. }) = node.value() else {
        return Err(Error::variant_mismatch("integer_atom", node.value()));
    };
    Ok(type_name(dtype.keyword()) + signing(dtype))
}

/// `logic`, `logic [7:0]`, `bit signed [3:0]`
pub fn integer_vector_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    _: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let Construct::DataType(dtype @ DataType::IntegerVector { range, .. }) = node.value() else {
        return Err(Error::variant_mismatch("integer_vector", node.value()));
    };

    let mut tokens = type_name(dtype.keyword()) + signing(dtype);
    if let Some(range) = range {
        tokens += sp() + symbol("[") + number(range.msb) + symbol(":") + number(range.lsb)
            + symbol("]");
    }
    Ok(tokens)
}
