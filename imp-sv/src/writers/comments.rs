//! Comment tokenizers.

use imp_core::{
    Error, Result,
    model::NodeRef,
    tokens::{TokenStream, block_comment, line_comment, newline, sp, symbol},
    writer::Tokenizer,
};

use crate::models::{Comment, CommentStyle, Construct};

fn comment_of<'a>(handler: &'static str, node: NodeRef<'a, Construct>) -> Result<&'a Comment> {
    match node.value() {
        Construct::Comment(comment) => Ok(comment),
        other => Err(Error::variant_mismatch(handler, other)),
    }
}

/// `// text`
fn line(text: &str) -> TokenStream<'static> {
    let mut tokens = TokenStream::from(symbol("//"));
    if !text.is_empty() {
        tokens += sp() + line_comment(text);
    }
    tokens + newline()
}

/// One `// text` line per line of the comment.
pub fn comment_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    _: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let comment = comment_of("comment", node)?;
    Ok(comment.lines().map(line).collect())
}

/// The comment text between two border lines.
pub fn banner_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    _: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let comment = comment_of("banner", node)?;
    let CommentStyle::Banner { border, width } = comment.style else {
        return Err(Error::variant_mismatch("banner", comment));
    };
    let rule = border.to_string().repeat(width);

    let mut tokens = line(&rule);
    tokens += comment.lines().map(line).collect::<TokenStream>();
    tokens += line(&rule);
    Ok(tokens)
}

/// `/* text */`, spread over several lines when the text is.
pub fn block_comment_tokenizer<'a>(
    node: NodeRef<'a, Construct>,
    _: &'a Tokenizer<Construct>,
) -> Result<TokenStream<'a>> {
    let comment = comment_of("block_comment", node)?;
    let lines: Vec<&str> = comment.lines().collect();

    if let [text] = lines.as_slice() {
        return Ok(symbol("/*") + sp() + block_comment(*text) + sp() + symbol("*/") + newline());
    }

    let body: TokenStream = lines
        .into_iter()
        .map(|text| {
            TokenStream::when(!text.is_empty(), || sp() + block_comment(text)) + newline()
        })
        .collect();
    Ok(symbol("/*") + newline() + body + symbol("*/") + newline())
}
