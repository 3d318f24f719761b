//! Helpers for emitting lists of items.

use super::{Token, TokenStream, dedent, indent, newline, sp, symbol};

/// Tokenize each item with `tokenize`, emitting `separator` between items.
///
/// Produces `item₁ SEP item₂ SEP … itemₙ` with no trailing separator.
/// Items are pulled one at a time as the stream is consumed.
pub fn separated<'a, I, F>(items: I, separator: Vec<Token>, mut tokenize: F) -> TokenStream<'a>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
    F: FnMut(I::Item) -> TokenStream<'a> + 'a,
{
    let mut items = items.into_iter().peekable();
    TokenStream::from_streams(std::iter::from_fn(move || {
        let item = items.next()?;
        let mut stream = tokenize(item);
        if items.peek().is_some() {
            stream += TokenStream::from_tokens(separator.clone());
        }
        Some(stream)
    }))
}

/// `a, b, c`
pub fn comma_separated<'a, I, F>(items: I, tokenize: F) -> TokenStream<'a>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
    F: FnMut(I::Item) -> TokenStream<'a> + 'a,
{
    separated(items, vec![symbol(","), sp()], tokenize)
}

/// `a; b; c`
pub fn semicolon_separated<'a, I, F>(items: I, tokenize: F) -> TokenStream<'a>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
    F: FnMut(I::Item) -> TokenStream<'a> + 'a,
{
    separated(items, vec![symbol(";"), sp()], tokenize)
}

/// A list laid out one item per line between two delimiters.
///
/// ```text
/// (
///   a,
///   b
/// )
/// ```
///
/// An empty list produces no tokens at all, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedBlock {
    pub start: Token,
    pub stop: Token,
    pub delimiter: Option<Token>,
}

impl DelimitedBlock {
    pub fn new(start: Token, stop: Token) -> Self {
        Self {
            start,
            stop,
            delimiter: None,
        }
    }

    /// Emit `delimiter` after every item but the last.
    pub fn delimited_by(mut self, delimiter: Token) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// `(` … `)` with comma separated items.
    pub fn parens_with_comma() -> Self {
        Self::new(symbol("("), symbol(")")).delimited_by(symbol(","))
    }

    /// Lay out `items`, each rendered by `tokenize`.
    pub fn tokenize<'a, I, F>(&self, items: I, mut tokenize: F) -> TokenStream<'a>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: 'a,
        F: FnMut(I::Item) -> TokenStream<'a> + 'a,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return TokenStream::empty();
        }

        let delimiter = self.delimiter.clone();
        let body = std::iter::from_fn(move || {
            let item = items.next()?;
            let mut stream = tokenize(item);
            if items.peek().is_some() {
                if let Some(delimiter) = &delimiter {
                    stream += delimiter.clone();
                }
                stream += newline();
            }
            Some(stream)
        });

        let mut stream = TokenStream::from_tokens([self.start.clone(), newline(), indent()]);
        stream += TokenStream::from_streams(body);
        stream += TokenStream::from_tokens([newline(), dedent(), self.stop.clone()]);
        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::identifier;

    fn ident<'a>(name: &&str) -> TokenStream<'a> {
        identifier(*name).into()
    }

    #[test]
    fn test_comma_separated() {
        let names = ["a", "b", "c"];
        let tokens = comma_separated(names.iter(), ident)
            .collect_tokens()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                identifier("a"),
                symbol(","),
                sp(),
                identifier("b"),
                symbol(","),
                sp(),
                identifier("c"),
            ]
        );
    }

    #[test]
    fn test_single_item_has_no_separator() {
        let tokens = semicolon_separated(["only"].iter(), ident)
            .collect_tokens()
            .unwrap();
        assert_eq!(tokens, vec![identifier("only")]);
    }

    #[test]
    fn test_separated_empty() {
        let names: [&str; 0] = [];
        assert!(
            comma_separated(names.iter(), ident)
                .collect_tokens()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_delimited_block() {
        let tokens = DelimitedBlock::parens_with_comma()
            .tokenize(["a", "b"].iter(), ident)
            .collect_tokens()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                symbol("("),
                newline(),
                indent(),
                identifier("a"),
                symbol(","),
                newline(),
                identifier("b"),
                newline(),
                dedent(),
                symbol(")"),
            ]
        );
    }

    #[test]
    fn test_empty_delimited_block_elides_delimiters() {
        let names: Vec<&str> = Vec::new();
        let tokens = DelimitedBlock::parens_with_comma()
            .tokenize(names.iter(), ident)
            .collect_tokens()
            .unwrap();
        assert!(tokens.is_empty());
    }
}
