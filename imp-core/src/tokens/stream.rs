//! Lazy, flattening token sequences.

use std::{
    collections::VecDeque,
    fmt,
    ops::{Add, AddAssign},
};

use super::Token;
use crate::{Error, Result};

/// An ordered, lazily produced sequence of tokens.
///
/// Streams nest freely (`a + (b + c)`), but iteration always yields a flat
/// sequence of tokens: a stream is a queue of parts, and concatenation
/// splices the parts of the right-hand side onto that queue. Pulling a token
/// therefore costs the same however many times the stream was appended to.
/// Nothing is produced until the stream is pulled, which keeps memory bounded
/// for large models.
///
/// Items are `Result`s because dispatch happens while the stream is pulled:
/// a node without a handler surfaces as an `Err` item at its position.
pub struct TokenStream<'a> {
    parts: VecDeque<Part<'a>>,
}

type Part<'a> = Box<dyn Iterator<Item = Result<Token>> + 'a>;

impl<'a> TokenStream<'a> {
    /// A stream producing nothing.
    pub fn empty() -> Self {
        Self {
            parts: VecDeque::new(),
        }
    }

    /// Wrap an iterator of already-checked items.
    pub fn from_results<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<Token>>,
        I::IntoIter: 'a,
    {
        let part: Part<'a> = Box::new(iter.into_iter());
        Self {
            parts: VecDeque::from([part]),
        }
    }

    /// Wrap a sequence of tokens.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        Self::from_results(tokens.into_iter().map(Ok))
    }

    /// Concatenate a (possibly lazy) sequence of streams.
    pub fn from_streams<I>(streams: I) -> Self
    where
        I: IntoIterator<Item = TokenStream<'a>>,
        I::IntoIter: 'a,
    {
        Self::from_results(streams.into_iter().flatten())
    }

    /// Defer building a stream until the first token is pulled.
    ///
    /// An `Err` from `build` becomes the single item of the stream.
    pub fn deferred<F>(build: F) -> Self
    where
        F: FnOnce() -> Result<TokenStream<'a>> + 'a,
    {
        Self::from_results(std::iter::once_with(build).flat_map(|built| match built {
            Ok(stream) => stream,
            Err(err) => TokenStream::fail(err),
        }))
    }

    /// A stream whose only item is `err`.
    pub fn fail(err: Error) -> Self {
        Self::from_results(std::iter::once(Err(err)))
    }

    /// The stream built by `f` if `condition` holds, nothing otherwise.
    pub fn when<F, T>(condition: bool, f: F) -> Self
    where
        F: FnOnce() -> T,
        T: Into<TokenStream<'a>>,
    {
        if condition { f().into() } else { Self::empty() }
    }

    /// Append another stream or token.
    pub fn chain(mut self, other: impl Into<TokenStream<'a>>) -> Self {
        self.append(other);
        self
    }

    /// Append another stream or token in place.
    pub fn append(&mut self, other: impl Into<TokenStream<'a>>) {
        self.parts.extend(other.into().parts);
    }

    /// Fully expand the stream, stopping at the first error.
    pub fn collect_tokens(self) -> Result<Vec<Token>> {
        self.collect()
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let part = self.parts.front_mut()?;
            match part.next() {
                Some(item) => return Some(item),
                None => {
                    self.parts.pop_front();
                }
            }
        }
    }
}

impl fmt::Debug for TokenStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStream")
            .field("parts", &self.parts.len())
            .finish_non_exhaustive()
    }
}

impl Default for TokenStream<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Token> for TokenStream<'_> {
    fn from(token: Token) -> Self {
        Self::from_results(std::iter::once(Ok(token)))
    }
}

impl From<Vec<Token>> for TokenStream<'_> {
    fn from(tokens: Vec<Token>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl<'a> FromIterator<TokenStream<'a>> for TokenStream<'a> {
    fn from_iter<I: IntoIterator<Item = TokenStream<'a>>>(iter: I) -> Self {
        let streams: Vec<_> = iter.into_iter().collect();
        Self::from_streams(streams)
    }
}

impl<'a, T: Into<TokenStream<'a>>> Add<T> for TokenStream<'a> {
    type Output = TokenStream<'a>;

    fn add(self, rhs: T) -> Self::Output {
        self.chain(rhs)
    }
}

impl<'a, T: Into<TokenStream<'a>>> AddAssign<T> for TokenStream<'a> {
    fn add_assign(&mut self, rhs: T) {
        self.append(rhs);
    }
}

impl Add<Token> for Token {
    type Output = TokenStream<'static>;

    fn add(self, rhs: Token) -> Self::Output {
        TokenStream::from_tokens([self, rhs])
    }
}

impl<'a> Add<TokenStream<'a>> for Token {
    type Output = TokenStream<'a>;

    fn add(self, rhs: TokenStream<'a>) -> Self::Output {
        TokenStream::from(self).chain(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind, identifier, keyword, newline, sp, symbol};

    fn values(stream: TokenStream<'_>) -> Vec<Token> {
        stream.collect_tokens().unwrap()
    }

    #[test]
    fn test_token_plus_token() {
        let stream = keyword("module") + sp();
        assert_eq!(values(stream), vec![keyword("module"), sp()]);
    }

    #[test]
    fn test_nested_concatenation_is_flat() {
        let inner = identifier("a") + symbol(",");
        let stream = keyword("x") + (inner + (sp() + identifier("b"))) + newline();
        assert_eq!(
            values(stream),
            vec![
                keyword("x"),
                identifier("a"),
                symbol(","),
                sp(),
                identifier("b"),
                newline(),
            ]
        );
    }

    #[test]
    fn test_add_assign() {
        let mut stream = TokenStream::empty();
        stream += keyword("localparam");
        stream += sp() + identifier("p1");
        assert_eq!(
            values(stream),
            vec![keyword("localparam"), sp(), identifier("p1")]
        );
    }

    #[test]
    fn test_long_append_chain_stays_flat() {
        let mut stream = TokenStream::empty();
        for _ in 0..100_000 {
            stream += sp();
        }
        stream = stream + newline();
        let tokens = values(stream);
        assert_eq!(tokens.len(), 100_001);
        assert_eq!(tokens.last(), Some(&newline()));
    }

    #[test]
    fn test_long_append_chain_drops() {
        let mut stream = symbol("(") + TokenStream::empty();
        for _ in 0..100_000 {
            stream += identifier("x") + symbol(",");
        }
        assert_eq!(stream.next(), Some(Ok(symbol("("))));
        drop(stream);
    }

    #[test]
    fn test_deferred_runs_on_pull() {
        use std::cell::Cell;

        let ran = Cell::new(false);
        let stream = TokenStream::deferred(|| {
            ran.set(true);
            Ok(symbol(";").into())
        });
        assert!(!ran.get());
        assert_eq!(values(stream), vec![symbol(";")]);
        assert!(ran.get());
    }

    #[test]
    fn test_deferred_error_becomes_item() {
        let stream = symbol("(")
            + TokenStream::deferred(|| Err(Error::UnclosedIndentation { depth: 1 }))
            + symbol(")");
        let items: Vec<_> = stream.collect();
        assert_eq!(items.len(), 3);
        assert!(items[1].is_err());
        assert_eq!(items[2].as_ref().unwrap().kind(), TokenKind::Symbol);
    }

    #[test]
    fn test_when() {
        assert!(values(TokenStream::when(false, newline)).is_empty());
        assert_eq!(values(TokenStream::when(true, newline)), vec![newline()]);
    }

    #[test]
    fn test_from_streams() {
        let stream: TokenStream = vec![
            TokenStream::from(identifier("a")),
            TokenStream::empty(),
            identifier("b") + identifier("c"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            values(stream),
            vec![identifier("a"), identifier("b"), identifier("c")]
        );
    }
}
