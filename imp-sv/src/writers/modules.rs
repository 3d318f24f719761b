//! Module and container tokenizers.

use imp_core::{
    Error, Result,
    model::NodeRef,
    tokens::{TokenStream, dedent, identifier, indent, keyword, newline, sp, symbol},
    writer::Tokenizer,
};

use crate::models::Construct;

/// ```text
/// module NAME(
/// );
///
///   ITEMS
/// endmodule
/// ```
///
/// The blank line after the header is only emitted for non-empty modules.
pub fn module_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    tokenizer: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let Construct::Module(module) = node.value() else {
        return Err(Error::variant_mismatch("module", node.value()));
    };

    let mut tokens: TokenStream<'a> = keyword("module").traced("module")
        + sp()
        + identifier(module.name.as_str())
        + symbol("(")
        + newline();
    tokens += symbol(")") + symbol(";") + newline();
    tokens += indent();
    tokens += TokenStream::when(node.has_children(), newline);
    tokens += tokenizer.tokenize_children(node);
    tokens += dedent();
    tokens += keyword("endmodule").traced("module") + newline();
    Ok(tokens)
}

/// Groups and blocks add no syntax of their own.
pub fn transparent_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    tokenizer: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    match node.value() {
        Construct::Group | Construct::Block(_) => Ok(tokenizer.tokenize_children(node)),
        other => Err(Error::variant_mismatch("transparent", other)),
    }
}
