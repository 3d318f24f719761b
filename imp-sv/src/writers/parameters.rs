//! Parameter declaration tokenizers.

use imp_core::{
    Error, Result,
    model::NodeRef,
    tokens::{TokenStream, comma_separated, identifier, keyword, literal, newline, sp, symbol},
    writer::Tokenizer,
};

use crate::models::{Construct, ParamKind};

/// `KEYWORD TYPE n1, n2 = VALUE;`
fn declaration_tokenizer<'a>(
    expected: ParamKind,
    node: NodeRef<'a, Construct>,
    tokenizer: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let decl = match node.value().declaration() {
        Some((kind, decl)) if kind == expected => decl,
        _ => return Err(Error::variant_mismatch(expected.as_str(), node.value())),
    };
    let dtype = node
        .get(decl.dtype)
        .ok_or_else(|| Error::variant_mismatch(expected.as_str(), decl))?;

    let mut tokens: TokenStream<'a> = keyword(expected.as_str()) + sp();
    tokens += tokenizer.tokenize(dtype);
    tokens += sp();
    tokens += comma_separated(decl.names.iter(), |name| {
        identifier(name.as_str()).into()
    });
    if let Some(value) = &decl.value {
        tokens += sp() + symbol("=") + sp() + literal(value.as_str());
    }
    tokens += symbol(";") + newline();
    Ok(tokens)
}

pub fn localparam_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    tokenizer: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    declaration_tokenizer(ParamKind::LocalParam, node, tokenizer)
}

pub fn parameter_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    tokenizer: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    declaration_tokenizer(ParamKind::Parameter, node, tokenizer)
}
