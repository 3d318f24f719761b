use super::{FormatOptions, Formatter, Tokenizer, Variant};
use crate::{
    Result,
    model::{NodeId, Tree},
};

/// A [`Tokenizer`] and a [`Formatter`] composed into one render step.
///
/// # Example
///
/// ```ignore
/// let mut writer = Writer::new(default_tokenizer()?, Formatter::default());
/// let text = writer.render(&tree, root)?;
/// ```
pub struct Writer<V: Variant> {
    tokenizer: Tokenizer<V>,
    formatter: Formatter,
}

impl<V: Variant> Writer<V> {
    pub fn new(tokenizer: Tokenizer<V>, formatter: Formatter) -> Self {
        Self {
            tokenizer,
            formatter,
        }
    }

    pub fn with_options(tokenizer: Tokenizer<V>, options: &FormatOptions) -> Self {
        Self::new(tokenizer, Formatter::with_options(options))
    }

    /// Render the subtree rooted at `root` from a fresh formatter state.
    ///
    /// # Errors
    ///
    /// Fails on the first dispatch or formatting error; the partial output is
    /// discarded by the next call.
    pub fn render(&mut self, tree: &Tree<V>, root: NodeId) -> Result<String> {
        self.reset();
        self.process(tree, root)?;
        self.formatter.finish()
    }

    /// Append the tokens of `node` to the current output.
    pub fn process(&mut self, tree: &Tree<V>, node: NodeId) -> Result<()> {
        self.formatter.process(self.tokenizer.tokenize(tree.node(node)))
    }

    /// Output produced since the last reset.
    pub fn text(&self) -> String {
        self.formatter.text()
    }

    pub fn reset(&mut self) {
        self.formatter.reset();
    }

    pub fn tokenizer(&self) -> &Tokenizer<V> {
        &self.tokenizer
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}
