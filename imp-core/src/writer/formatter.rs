//! Converts a flat token stream into indented text.

use serde::Serialize;

use super::{FormatOptions, Indent};
use crate::{
    Error, Result,
    tokens::{Token, TokenKind},
};

/// One processed token, recorded when tracing is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// The token as displayed (`Keyword("module")`, `Indent`, ...).
    pub token: String,
    /// Provenance label attached by the tokenizer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<&'static str>,
    /// Open indentation levels after the token.
    pub depth: usize,
    /// Output line the token landed on (1-based).
    pub line: usize,
}

/// Stateful renderer for token streams.
///
/// Keeps the completed lines, the fragments of the line being built, and a
/// stack of indentation prefixes. A newline always completes exactly one
/// output line; an empty line carries no prefix, so no trailing whitespace is
/// produced.
///
/// # Example
///
/// ```
/// use imp_core::tokens::{dedent, indent, keyword, newline, symbol};
/// use imp_core::writer::Formatter;
///
/// let tokens = keyword("begin") + newline() + indent() + symbol(";") + newline()
///     + dedent() + keyword("end");
///
/// let mut formatter = Formatter::default();
/// formatter.process(tokens)?;
/// assert_eq!(formatter.finish()?, "begin\n  ;\nend");
/// # Ok::<(), imp_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Formatter {
    lines: Vec<String>,
    current: Vec<String>,
    prefix: Vec<String>,
    tab: String,
    ended: bool,
    trace: Option<Vec<TraceEntry>>,
}

impl Formatter {
    /// Create a formatter using `tab` for each indentation level.
    pub fn new(tab: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            prefix: Vec::new(),
            tab: tab.into(),
            ended: false,
            trace: None,
        }
    }

    pub fn with_options(options: &FormatOptions) -> Self {
        let formatter = Self::new(options.indent.unit());
        if options.trace {
            formatter.traced()
        } else {
            formatter
        }
    }

    /// Record a [`TraceEntry`] for every processed token.
    pub fn traced(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Drop all output and state, keeping configuration.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.current.clear();
        self.prefix.clear();
        self.ended = false;
        if let Some(trace) = &mut self.trace {
            trace.clear();
        }
    }

    /// Feed tokens in order, stopping at the first error.
    pub fn process<I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<Token>>,
    {
        for token in tokens {
            self.handle(token?)?;
        }
        Ok(())
    }

    /// Apply a single token.
    pub fn handle(&mut self, token: Token) -> Result<()> {
        if self.ended {
            return Err(malformed(&token, "token after end of file"));
        }

        match token.kind() {
            TokenKind::Null => {}
            TokenKind::EndOfFile => self.ended = true,
            TokenKind::Space(n) => self.current.push(" ".repeat(n)),
            TokenKind::Indent => {
                let unit = token.value().unwrap_or(self.tab.as_str()).to_string();
                self.prefix.push(unit);
            }
            TokenKind::Dedent => {
                if self.prefix.pop().is_none() {
                    return Err(Error::UnbalancedIndentation {
                        line: self.lines.len() + 1,
                    });
                }
            }
            TokenKind::NewLine => self.end_line(),
            kind if kind.is_text() => {
                let value = token
                    .value()
                    .ok_or_else(|| malformed(&token, "text token without a value"))?;
                if value.contains('\n') {
                    return Err(malformed(&token, "text token spans several lines"));
                }
                self.current.push(value.to_string());
            }
            _ => return Err(malformed(&token, "unrecognized token kind")),
        }

        self.record(&token);
        Ok(())
    }

    fn end_line(&mut self) {
        if self.current.is_empty() {
            self.lines.push(String::new());
        } else {
            let line = self.prefixed_line();
            self.current.clear();
            self.lines.push(line);
        }
    }

    fn prefixed_line(&self) -> String {
        let mut line = self.prefix.concat();
        for fragment in &self.current {
            line.push_str(fragment);
        }
        line
    }

    fn record(&mut self, token: &Token) {
        let depth = self.prefix.len();
        let line = self.lines.len() + 1;
        if let Some(trace) = &mut self.trace {
            trace.push(TraceEntry {
                token: token.to_string(),
                trace: token.trace(),
                depth,
                line,
            });
        }
    }

    /// Open indentation levels.
    pub fn depth(&self) -> usize {
        self.prefix.len()
    }

    /// Recorded trace, empty unless tracing is enabled.
    pub fn trace(&self) -> &[TraceEntry] {
        self.trace.as_deref().unwrap_or_default()
    }

    /// The text produced so far: completed lines plus the pending line.
    pub fn text(&self) -> String {
        let mut lines = self.lines.clone();
        if !self.current.is_empty() {
            lines.push(self.prefixed_line());
        }
        lines.join("\n")
    }

    /// The finished text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnclosedIndentation`] if an indent was never closed.
    pub fn finish(&self) -> Result<String> {
        if !self.prefix.is_empty() {
            return Err(Error::UnclosedIndentation {
                depth: self.prefix.len(),
            });
        }
        Ok(self.text())
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Indent::default().unit())
    }
}

fn malformed(token: &Token, reason: &'static str) -> Error {
    Error::MalformedTokenInput {
        token: token.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{
        Token, TokenStream, dedent, end_of_file, identifier, indent, indent_by, keyword, newline,
        null, sp, space, symbol,
    };

    fn render(tokens: TokenStream<'_>) -> Result<String> {
        let mut formatter = Formatter::default();
        formatter.process(tokens)?;
        formatter.finish()
    }

    #[test]
    fn test_words_join_on_one_line() {
        let text = render(keyword("module") + sp() + identifier("example") + symbol("(")).unwrap();
        assert_eq!(text, "module example(");
    }

    #[test]
    fn test_indentation_prefixes() {
        let tokens = keyword("a")
            + newline()
            + indent()
            + keyword("b")
            + newline()
            + indent()
            + keyword("c")
            + newline()
            + dedent()
            + dedent()
            + keyword("d");
        assert_eq!(render(tokens).unwrap(), "a\n  b\n    c\nd");
    }

    #[test]
    fn test_newline_on_empty_buffer_is_blank_line() {
        let tokens = keyword("a")
            + newline()
            + indent()
            + newline()
            + keyword("b")
            + newline()
            + dedent();
        assert_eq!(render(tokens).unwrap(), "a\n\n  b");
    }

    #[test]
    fn test_space_and_null() {
        let tokens = keyword("a") + space(3) + null() + keyword("b");
        assert_eq!(render(tokens).unwrap(), "a   b");
    }

    #[test]
    fn test_custom_tab_and_indent_prefix() {
        let mut formatter = Formatter::new("\t");
        formatter
            .process(keyword("x") + newline() + indent() + indent_by("| ") + keyword("y"))
            .unwrap();
        assert_eq!(formatter.depth(), 2);
        assert_eq!(formatter.text(), "x\n\t| y");
    }

    #[test]
    fn test_unmatched_dedent() {
        let err = render(keyword("a") + newline() + dedent()).unwrap_err();
        assert_eq!(err, Error::UnbalancedIndentation { line: 2 });
    }

    #[test]
    fn test_unclosed_indent_is_reported() {
        let err = render(indent() + keyword("a")).unwrap_err();
        assert_eq!(err, Error::UnclosedIndentation { depth: 1 });
    }

    #[test]
    fn test_malformed_tokens() {
        let missing = Token::new(TokenKind::Keyword, None);
        assert!(matches!(
            render(missing.into()),
            Err(Error::MalformedTokenInput { .. })
        ));

        let multiline = keyword("a\nb");
        assert!(matches!(
            render(multiline.into()),
            Err(Error::MalformedTokenInput { .. })
        ));

        let after_eof = keyword("a") + end_of_file() + keyword("b");
        assert!(matches!(
            render(after_eof),
            Err(Error::MalformedTokenInput { .. })
        ));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut formatter = Formatter::default();
        formatter
            .process(keyword("stale") + newline() + indent())
            .unwrap();
        formatter.reset();
        formatter.process(TokenStream::from(keyword("fresh"))).unwrap();
        assert_eq!(formatter.finish().unwrap(), "fresh");
    }

    #[test]
    fn test_trace() {
        let mut formatter = Formatter::default().traced();
        formatter
            .process(keyword("a").traced("head") + newline() + indent() + dedent())
            .unwrap();
        let trace = formatter.trace();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace[0].token, "Keyword(\"a\")");
        assert_eq!(trace[0].trace, Some("head"));
        assert_eq!(trace[1].line, 2);
        assert_eq!(trace[2].depth, 1);
        assert_eq!(trace[3].depth, 0);
    }

    #[test]
    fn test_trace_disabled_by_default() {
        let mut formatter = Formatter::default();
        formatter.process(TokenStream::from(keyword("a"))).unwrap();
        assert!(formatter.trace().is_empty());
    }

    #[test]
    fn test_trace_entry_json() {
        let entry = TraceEntry {
            token: "Indent".to_string(),
            trace: None,
            depth: 1,
            line: 2,
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"token":"Indent","depth":1,"line":2}"#
        );
    }
}
