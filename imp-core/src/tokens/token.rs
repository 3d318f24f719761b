//! Primitive output units.

use std::fmt;

use serde::Serialize;

/// What a token means to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Literal values copied verbatim (numbers in expressions, strings).
    Literal,
    /// Names of variables, signals, parameters.
    Identifier,
    /// Reserved words of the target language.
    Keyword,
    /// Punctuation and operators.
    Symbol,
    /// Numeric literals.
    Number,
    /// Data type names.
    Type,
    /// A complete single line comment.
    LineComment,
    /// A complete block comment.
    BlockComment,
    /// A run of `n` space characters.
    Space(usize),
    /// Opens one indentation level.
    Indent,
    /// Closes one indentation level.
    Dedent,
    /// Terminates the current output line.
    NewLine,
    /// Marks the end of the generated source.
    EndOfFile,
    /// Ignored by the formatter.
    Null,
}

impl TokenKind {
    /// Returns true for kinds whose value is copied into the output.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Literal
                | Self::Identifier
                | Self::Keyword
                | Self::Symbol
                | Self::Number
                | Self::Type
                | Self::LineComment
                | Self::BlockComment
        )
    }

    /// Returns true for kinds that only control layout.
    pub fn is_formatting(&self) -> bool {
        matches!(
            self,
            Self::Space(_) | Self::Indent | Self::Dedent | Self::NewLine
        )
    }
}

/// Source position attached to a token for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// An immutable unit of generated output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    kind: TokenKind,
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'static str>,
}

impl Token {
    /// Create a token from its raw parts.
    ///
    /// The typed constructors below always produce well-formed tokens; this
    /// one does not check, and the formatter rejects what it cannot print.
    pub fn new(kind: TokenKind, value: Option<String>) -> Self {
        Self {
            kind,
            value,
            position: None,
            trace: None,
        }
    }

    fn text(kind: TokenKind, value: impl Into<String>) -> Self {
        Self::new(kind, Some(value.into()))
    }

    fn marker(kind: TokenKind) -> Self {
        Self::new(kind, None)
    }

    /// Attach a source position.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Some(Position { line, column });
        self
    }

    /// Attach a provenance label shown in formatter traces.
    pub fn traced(mut self, label: &'static str) -> Self {
        self.trace = Some(label);
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn trace(&self) -> Option<&'static str> {
        self.trace
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Space(n), _) => write!(f, "Space({})", n),
            (kind, Some(value)) => write!(f, "{:?}({:?})", kind, value),
            (kind, None) => write!(f, "{:?}", kind),
        }?;
        if let Some(pos) = self.position {
            write!(f, "@{}:{}", pos.line, pos.column)?;
        }
        Ok(())
    }
}

impl IntoIterator for Token {
    type Item = Token;
    type IntoIter = std::iter::Once<Token>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

pub fn literal(value: impl Into<String>) -> Token {
    Token::text(TokenKind::Literal, value)
}

pub fn identifier(value: impl Into<String>) -> Token {
    Token::text(TokenKind::Identifier, value)
}

pub fn keyword(value: impl Into<String>) -> Token {
    Token::text(TokenKind::Keyword, value)
}

pub fn symbol(value: impl Into<String>) -> Token {
    Token::text(TokenKind::Symbol, value)
}

pub fn number(value: impl ToString) -> Token {
    Token::text(TokenKind::Number, value.to_string())
}

pub fn type_name(value: impl Into<String>) -> Token {
    Token::text(TokenKind::Type, value)
}

pub fn line_comment(value: impl Into<String>) -> Token {
    Token::text(TokenKind::LineComment, value)
}

pub fn block_comment(value: impl Into<String>) -> Token {
    Token::text(TokenKind::BlockComment, value)
}

/// `n` spaces.
pub fn space(n: usize) -> Token {
    Token::marker(TokenKind::Space(n))
}

/// A single space.
pub fn sp() -> Token {
    space(1)
}

pub fn indent() -> Token {
    Token::marker(TokenKind::Indent)
}

/// An indent whose prefix is `prefix` instead of the formatter's tab unit.
pub fn indent_by(prefix: impl Into<String>) -> Token {
    Token::text(TokenKind::Indent, prefix)
}

pub fn dedent() -> Token {
    Token::marker(TokenKind::Dedent)
}

pub fn newline() -> Token {
    Token::marker(TokenKind::NewLine)
}

pub fn end_of_file() -> Token {
    Token::marker(TokenKind::EndOfFile)
}

pub fn null() -> Token {
    Token::marker(TokenKind::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind_and_value() {
        let tok = keyword("module");
        assert_eq!(tok.kind(), TokenKind::Keyword);
        assert_eq!(tok.value(), Some("module"));

        let tok = number(30);
        assert_eq!(tok.kind(), TokenKind::Number);
        assert_eq!(tok.value(), Some("30"));

        assert_eq!(space(3).kind(), TokenKind::Space(3));
        assert_eq!(newline().value(), None);
    }

    #[test]
    fn test_token_iterates_as_itself() {
        let tokens: Vec<Token> = symbol(";").into_iter().collect();
        assert_eq!(tokens, vec![symbol(";")]);
    }

    #[test]
    fn test_display() {
        assert_eq!(identifier("p1").to_string(), "Identifier(\"p1\")");
        assert_eq!(space(2).to_string(), "Space(2)");
        assert_eq!(indent().to_string(), "Indent");
        assert_eq!(symbol("(").at(3, 7).to_string(), "Symbol(\"(\")@3:7");
    }

    #[test]
    fn test_kind_classes() {
        assert!(TokenKind::Keyword.is_text());
        assert!(!TokenKind::NewLine.is_text());
        assert!(TokenKind::Space(1).is_formatting());
        assert!(!TokenKind::Null.is_formatting());
    }
}
